use sdprobe::{GenServerClient, GenerationRequest, PollConfig, PollOutcome, ServerConfig};
use std::env;
use std::process::ExitCode;

const DEFAULT_PROMPT: &str = "test image";
const DEFAULT_OUTPUT: &str = "sdprobe_output.png";

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = sdprobe::logger::init_with_config(
        sdprobe::logger::LoggerConfig::development().with_level(sdprobe::logger::LogLevel::Info),
    ) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    match dotenv::dotenv() {
        Ok(_) => log::debug!("✅ .env file loaded"),
        Err(_) => log::debug!("No .env file found, using system environment variables"),
    }

    let server_config = ServerConfig::from_env();
    let poll_config = PollConfig::from_env();

    log::info!("🔄 Connecting to generation server at {}", server_config.base_url);

    let client = match GenServerClient::new(server_config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to build client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match client.health().wait_until_ready(&poll_config).await {
        PollOutcome::Ready { attempts } => {
            log::info!("✅ Server ready ({} poll(s))", attempts);
        }
        PollOutcome::ServerError { detail } => {
            log::error!(
                "❌ Model failed to load: {} (check server logs)",
                detail.unwrap_or_else(|| "no detail".to_string())
            );
            return ExitCode::FAILURE;
        }
        PollOutcome::TimedOut { waited, attempts } => {
            log::error!(
                "❌ Timed out waiting for model load after {:.0}s ({} poll(s))",
                waited.as_secs_f64(),
                attempts
            );
            return ExitCode::FAILURE;
        }
    }

    let mut args = env::args().skip(1);
    let prompt = args.next().unwrap_or_else(|| DEFAULT_PROMPT.to_string());
    let output_path = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let mut request = GenerationRequest::new(prompt);
    if let Some(steps) = env::var("SDPROBE_STEPS").ok().and_then(|s| s.parse().ok()) {
        request = request.with_steps(steps);
    }

    let timer = sdprobe::logger::timer("generation");
    match client.generation().generate_to_file(&request, &output_path).await {
        Ok(image) => {
            timer.stop();
            if image.is_png() {
                log::info!("✅ SUCCESS: PNG image generated ({} bytes)", image.len());
            } else {
                log::warn!(
                    "⚠️  Image generated but bytes are not PNG (declared format: {})",
                    image.format.as_deref().unwrap_or("none")
                );
            }
            log::info!("Image saved to {}", output_path);
            ExitCode::SUCCESS
        }
        Err(e) => {
            timer.stop();
            log::error!("❌ FAILURE: {}", e);
            ExitCode::FAILURE
        }
    }
}
