use ela_forensics::{ElaAnalyzer, ElaConfig, error::Result, report::ElaJsonReport};

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "evidences/sample.jpg".into());

    println!("Examining file {path}...");

    let config = ElaConfig::default();
    let result = ElaAnalyzer::new(&path)?
        .with_config(config.clone())
        .analyze()?;

    result.save_difference("sample_difference.jpg")?;
    result.save_masked("sample_masked.jpg")?;

    println!("  Max difference: {}", result.difference.max_difference);
    println!("  Channel maxima: {:?}", result.difference.channel_max);
    println!("  Scale: {:.2}", result.difference.scale);
    println!(
        "  Flagged pixels: {} ({:.2}%)",
        result.masked.flagged_pixels,
        result.flagged_fraction() * 100.0
    );

    match ElaJsonReport::new(&config, &result).to_json() {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("Report serialization failed: {err}"),
    }

    println!("Finished");

    Ok(())
}
