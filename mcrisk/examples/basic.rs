use mcrisk::prelude::*;

fn main() -> Result<()> {
    let params = GbmParameters::new(100.0, 0.05, 0.20, 1.0, 252)?;

    let estimate = RiskSimulation::new(params, 200_000, 0.99, 42).run()?;
    let reference = lognormal_tail_risk(&params, 0.99)?;

    println!("Monte Carlo: VaR = {:.4}, ES = {:.4}", estimate.var(), estimate.es());
    println!("Lognormal:   VaR = {:.4}, ES = {:.4}", reference.var(), reference.es());
    Ok(())
}
