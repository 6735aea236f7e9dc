use crate::cli::BoxArgs;
use crate::error::{CliError, Result};
use pchem::core::particle_box::ParticleInBox;
use pchem::engine::error::EngineError;
use tracing::info;

pub fn run(args: BoxArgs) -> Result<()> {
    if args.levels == 0 {
        return Err(CliError::Argument(
            "--levels must be at least 1".to_string(),
        ));
    }
    let model = ParticleInBox::new(args.length, args.mass, args.hbar).map_err(EngineError::from)?;
    info!(
        length = model.length,
        levels = args.levels,
        "Evaluating particle-in-a-box levels."
    );

    let region = args.from.zip(args.to);
    match region {
        Some((x1, x2)) => println!(
            "{:>4} {:>16} {:>16}",
            "n",
            "energy",
            format!("P({}, {})", x1, x2)
        ),
        None => println!("{:>4} {:>16}", "n", "energy"),
    }

    for n in 1..=args.levels {
        let energy = model.energy(n).map_err(EngineError::from)?;
        match region {
            Some((x1, x2)) => {
                let probability = model.probability(n, x1, x2).map_err(EngineError::from)?;
                println!("{:>4} {:>16.8} {:>16.8}", n, energy, probability);
            }
            None => println!("{:>4} {:>16.8}", n, energy),
        }
    }
    Ok(())
}
