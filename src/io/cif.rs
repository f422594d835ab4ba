// src/io/cif.rs
//
// Minimal CIF reader: cell parameters + atom-site loop. Structures are
// assumed P1 (already symmetry-expanded); _symmetry_equiv_pos loops are
// ignored.

use crate::model::structure::{Atom, Structure};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

pub fn parse(path: &str) -> io::Result<Structure> {
    let file = File::open(Path::new(path))?;
    let reader = io::BufReader::new(file);

    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    parse_lines(&lines)
}

fn parse_lines(lines: &[String]) -> io::Result<Structure> {
    let mut a = 0.0; let mut b = 0.0; let mut c = 0.0;
    let mut alpha = 90.0; let mut beta = 90.0; let mut gamma = 90.0;

    let mut frac_atoms: Vec<Atom> = Vec::new();

    let mut in_loop = false;
    let mut current_loop_headers: Vec<String> = Vec::new();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') { continue; }

        // 1. Cell Parameters
        if trimmed.starts_with("_cell_length_a") { a = parse_cif_val(trimmed); }
        if trimmed.starts_with("_cell_length_b") { b = parse_cif_val(trimmed); }
        if trimmed.starts_with("_cell_length_c") { c = parse_cif_val(trimmed); }
        if trimmed.starts_with("_cell_angle_alpha") { alpha = parse_cif_val(trimmed); }
        if trimmed.starts_with("_cell_angle_beta") { beta = parse_cif_val(trimmed); }
        if trimmed.starts_with("_cell_angle_gamma") { gamma = parse_cif_val(trimmed); }

        // 2. Loop Detection
        if trimmed.starts_with("loop_") {
            in_loop = true;
            current_loop_headers.clear();
            continue;
        }

        // 3. Header Parsing
        if in_loop && trimmed.starts_with('_') {
            current_loop_headers.push(trimmed.to_string());
            continue;
        }

        // 4. Data Rows
        if in_loop {
            if trimmed.starts_with("data_") {
                in_loop = false;
                continue;
            }
            let is_atom_loop = current_loop_headers
                .iter()
                .any(|h| h.contains("_atom_site_fract_x"));
            if !is_atom_loop { continue; }

            let parts: Vec<&str> = trimmed.split_whitespace().collect();
            if parts.len() < current_loop_headers.len() { continue; }

            let mut label = String::new();
            let mut fx = 0.0; let mut fy = 0.0; let mut fz = 0.0;

            for (i, header) in current_loop_headers.iter().enumerate() {
                let val = parts[i];
                if header.contains("_atom_site_type_symbol")
                    || (label.is_empty() && header.contains("_atom_site_label"))
                {
                    label = val.chars().filter(|ch| ch.is_alphabetic()).collect();
                } else if header.contains("_atom_site_fract_x") { fx = parse_cif_float(val); }
                else if header.contains("_atom_site_fract_y") { fy = parse_cif_float(val); }
                else if header.contains("_atom_site_fract_z") { fz = parse_cif_float(val); }
            }

            frac_atoms.push(Atom {
                element: label,
                position: [
                    fx.rem_euclid(1.0),
                    fy.rem_euclid(1.0),
                    fz.rem_euclid(1.0),
                ],
            });
        }
    }

    if a <= 0.0 || b <= 0.0 || c <= 0.0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "CIF is missing cell lengths",
        ));
    }

    // 5. Lattice Construction (standard crystallographic convention:
    //    a along x, b in the xy-plane)
    let to_rad = std::f64::consts::PI / 180.0;
    let alpha_r = alpha * to_rad;
    let beta_r = beta * to_rad;
    let gamma_r = gamma * to_rad;
    let v = (1.0 - alpha_r.cos().powi(2) - beta_r.cos().powi(2) - gamma_r.cos().powi(2)
        + 2.0 * alpha_r.cos() * beta_r.cos() * gamma_r.cos())
    .sqrt();

    let lattice = [
        [a, 0.0, 0.0],
        [b * gamma_r.cos(), b * gamma_r.sin(), 0.0],
        [
            c * beta_r.cos(),
            c * (alpha_r.cos() - beta_r.cos() * gamma_r.cos()) / gamma_r.sin(),
            c * v / gamma_r.sin(),
        ],
    ];

    // 6. Fractional -> Cartesian
    let mut atoms = frac_atoms;
    for atom in &mut atoms {
        let f = atom.position;
        atom.position = [
            f[0] * lattice[0][0] + f[1] * lattice[1][0] + f[2] * lattice[2][0],
            f[0] * lattice[0][1] + f[1] * lattice[1][1] + f[2] * lattice[2][1],
            f[0] * lattice[0][2] + f[1] * lattice[1][2] + f[2] * lattice[2][2],
        ];
    }

    let formula = chemical_formula(&atoms);

    Ok(Structure { lattice, atoms, formula })
}

fn chemical_formula(atoms: &[Atom]) -> String {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for atom in atoms {
        match counts.iter_mut().find(|(el, _)| *el == atom.element) {
            Some((_, n)) => *n += 1,
            None => counts.push((atom.element.clone(), 1)),
        }
    }
    counts
        .iter()
        .map(|(el, n)| if *n == 1 { el.clone() } else { format!("{}{}", el, n) })
        .collect()
}

// "_cell_length_a   10.20(3)" -> 10.20
fn parse_cif_val(line: &str) -> f64 {
    match line.find(char::is_whitespace) {
        Some(idx) => parse_cif_float(line[idx..].trim()),
        None => 0.0,
    }
}

fn parse_cif_float(s: &str) -> f64 {
    let clean: String = s.chars().take_while(|c| *c != '(').collect();
    clean.parse().unwrap_or(0.0)
}
