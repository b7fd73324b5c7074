//! Demo that runs a few sample texts through the analyzer and prints the
//! JSON reports (set RISK_SIGNAL_MODE=mock to exercise the external path).

use content_risk_engine::external::{build_provider_from_config, load_signal_config};
use content_risk_engine::{Category, ContentRiskAnalyzer, RequestMetadata};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let cfg = load_signal_config();
    let analyzer = ContentRiskAnalyzer::new()
        .with_provider(Category::HateSpeech, build_provider_from_config(&cfg))
        .with_provider(Category::Toxicity, build_provider_from_config(&cfg));

    let samples = [
        "Hello, how are you today?",
        "You are so stupid and annoying",
        "yeah right, I hate all those people",
        "According to historians, such slurs were common in 1850.",
    ];

    for text in samples {
        let report = analyzer.analyze(text, RequestMetadata::default()).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    println!("analyze-demo done");
    Ok(())
}
