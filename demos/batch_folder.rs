use ela_forensics::{
    ElaConfig,
    batch::{self, InputTarget},
    error::Result,
    report::BatchJsonReport,
};

fn main() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "evidences".into());

    let target = InputTarget::resolve(&path)?;
    let outcomes = batch::run(&target, &ElaConfig::default(), None)?;

    for outcome in &outcomes {
        match &outcome.result {
            Ok(processed) => println!(
                "{} -> {}",
                outcome.input.display(),
                processed.masked_path.display()
            ),
            Err(err) => println!("{} failed: {}", outcome.input.display(), err),
        }
    }

    match BatchJsonReport::from(outcomes.as_slice()).to_json() {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("Report serialization failed: {err}"),
    }

    println!("Finished");

    Ok(())
}
