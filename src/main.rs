use clap::Parser;
use receipt_verifier::cli::CliOptions;
use receipt_verifier::config::setup_logging;
use receipt_verifier::constants::ANALYSIS_PROMPT;
use receipt_verifier::gemini::GeminiClient;
use receipt_verifier::receipt::encode_image;
use receipt_verifier::verdict::Verdict;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = CliOptions::parse();

    let _ = setup_logging(cli.debug);

    std::process::exit(run(cli).await);
}

/// Runs the pipeline and returns the process exit code. Exactly one JSON
/// document lands on stdout on every path; remote failures are reported as a
/// FLAGGED verdict with exit code 0, missing inputs and unreadable images
/// exit with 1.
async fn run(cli: CliOptions) -> i32 {
    let (Some(api_key), Some(image_path)) = (cli.api_key, cli.image_path) else {
        println!(
            "{}",
            Verdict::fallback("API key or Image path is missing.").to_json_string()
        );
        return 1;
    };

    let image_b64 = match encode_image(&image_path) {
        Ok(data) => data,
        Err(err) => {
            error!("Image encoding error: {}", err);
            println!(
                "{}",
                Verdict::fallback("Failed to encode image.").to_json_string()
            );
            return 1;
        }
    };

    let analysis = match GeminiClient::new(&api_key, &cli.model) {
        Ok(client) => client.analyze(&image_b64, ANALYSIS_PROMPT).await,
        Err(err) => Err(err),
    };

    match analysis {
        Ok(verdict) => {
            let json = serde_json::to_string(&verdict).unwrap_or_else(|_| {
                Verdict::fallback("AI analysis failed or returned an invalid response.")
                    .to_json_string()
            });
            println!("{json}");
            0
        }
        Err(err) => {
            error!("AI analysis error: {}", err);
            println!(
                "{}",
                Verdict::fallback("AI analysis failed or returned an invalid response.")
                    .to_json_string()
            );
            0
        }
    }
}
