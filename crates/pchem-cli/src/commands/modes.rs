use crate::cli::ModesArgs;
use crate::error::Result;
use pchem::core::normal_modes::solve_normal_modes;
use pchem::engine::error::EngineError;
use tracing::info;

pub fn run(args: ModesArgs) -> Result<()> {
    info!(
        k1 = args.k1,
        k2 = args.k2,
        k3 = args.k3,
        "Solving coupled-spring normal modes."
    );
    let modes = solve_normal_modes(args.k1, args.k2, args.k3).map_err(EngineError::from)?;
    let frequencies = modes.frequencies(args.mass).map_err(EngineError::from)?;

    println!("{:>14} {:>14}  {}", "eigenvalue", "frequency", "eigenvector");
    for ((eigenvalue, eigenvector), frequency) in modes
        .eigenvalues
        .iter()
        .zip(&modes.eigenvectors)
        .zip(frequencies)
    {
        println!("{:>14.8} {:>14.8}  {:?}", eigenvalue, frequency, eigenvector);
    }
    Ok(())
}
