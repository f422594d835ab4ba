//! CLI for porosity and overlap analysis of periodic crystal structures.

use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use porosim::{
    estimate, estimate_seeded, total_overlap, CovalentBondPolicy, ElementTable, PeriodicCell,
    SphereSet, PRESET_PROBES,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "porosim")]
#[command(about = "Monte-Carlo porosity analysis of periodic crystal structures")]
#[command(
    long_about = "Loads a CIF structure and estimates its void fraction, \
    probe-accessible pore volume and total bonded atomic-overlap volume \
    using random sampling under periodic boundary conditions."
)]
struct Cli {
    /// Input structure (CIF format, P1 / symmetry-expanded)
    input: String,

    /// Probe sphere radius in Å (1.20 = helium, 0.0 = geometric void)
    #[arg(long, default_value_t = 1.20)]
    probe: f64,

    /// Named preset probe (He, H2, H2O, CO2, N2, CH4, Geometric);
    /// overrides --probe
    #[arg(long)]
    probe_gas: Option<String>,

    /// Number of Monte-Carlo trials
    #[arg(long, default_value_t = 100_000)]
    trials: u64,

    /// RNG seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Bond detection tolerance (scales the covalent-radius sum)
    #[arg(long, default_value_t = 1.15)]
    bond_tolerance: f64,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report {
    formula: String,
    atoms: usize,
    cell_volume: f64,
    density: f64,
    probe_radius: f64,
    trials: u64,
    hits: u64,
    void_fraction: f64,
    accessible_volume: f64,
    pore_volume_per_gram: f64,
    overlap_volume: f64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = porosim::utils::logger::init(level);

    match run(&cli) {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_report(&report);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Report, Box<dyn std::error::Error>> {
    info!("Loading structure from {}", cli.input);
    let structure = porosim::io::cif::parse(&cli.input)?;
    debug!(
        "Parsed {} atoms, formula {}",
        structure.atoms.len(),
        structure.formula
    );

    let probe_radius = match &cli.probe_gas {
        Some(name) => {
            PRESET_PROBES
                .iter()
                .find(|(gas, _)| gas.eq_ignore_ascii_case(name))
                .map(|(_, r)| *r)
                .ok_or_else(|| format!("Unknown probe gas '{}'", name))?
        }
        None => cli.probe,
    };

    let table = ElementTable::standard();
    let cell = PeriodicCell::from_lattice(structure.lattice)?;
    let spheres = SphereSet::from_structure(&structure, &table)?;
    let symbols: Vec<String> = structure.atoms.iter().map(|a| a.element.clone()).collect();

    info!(
        "Sampling {} trials with probe radius {:.2} Å",
        cli.trials, probe_radius
    );
    let sampling = match cli.seed {
        Some(seed) => estimate_seeded(&cell, &spheres, probe_radius, cli.trials, seed)?,
        None => estimate(&cell, &spheres, probe_radius, cli.trials)?,
    };

    let policy = CovalentBondPolicy::with_tolerance(&symbols, &table, cli.bond_tolerance)?;
    let overlap_volume = total_overlap(&spheres, &symbols, &cell, &policy)?;

    let density = structure.density(&table, cell.volume())?;

    Ok(Report {
        formula: structure.formula.clone(),
        atoms: structure.atoms.len(),
        cell_volume: cell.volume(),
        density,
        probe_radius: sampling.probe_radius,
        trials: sampling.trials,
        hits: sampling.hits,
        void_fraction: sampling.void_fraction(),
        accessible_volume: sampling.accessible_volume(&cell),
        pore_volume_per_gram: sampling.pore_volume_per_gram(density),
        overlap_volume,
    })
}

fn print_report(r: &Report) {
    println!("Structure:            {} ({} atoms)", r.formula, r.atoms);
    println!("Cell volume:          {:.3} Å³", r.cell_volume);
    println!("Density:              {:.4} g/cm³", r.density);
    println!(
        "Void fraction:        {:.2} %  ({} / {} trials, probe {:.2} Å)",
        r.void_fraction * 100.0,
        r.hits,
        r.trials,
        r.probe_radius
    );
    println!("Accessible volume:    {:.3} Å³", r.accessible_volume);
    println!("Pore volume:          {:.4} cm³/g", r.pore_volume_per_gram);
    println!("Bonded overlap:       {:.3} Å³", r.overlap_volume);
}
