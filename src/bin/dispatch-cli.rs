use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "dispatch-cli")]
#[command(about = "Management CLI for the path dispatch server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    #[arg(short, long, default_value = "CHANGE_ME_IN_PRODUCTION")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show server status and route count
    Status,
    /// Check whether a path has a registered handler
    Check {
        /// Path to check; normalized by the server
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let request = match &cli.command {
        Commands::Status => client.get(format!("{}/admin/status", cli.url)),
        Commands::Check { path } => client
            .get(format!("{}/admin/routes/check", cli.url))
            .query(&[("path", path)]),
    };

    let res = request.headers(headers).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    ensure_success(status, &text)?;

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Turn a non-2xx admin response into an error so the process exits non-zero.
fn ensure_success(status: reqwest::StatusCode, body: &str) -> Result<(), String> {
    if status.is_success() {
        return Ok(());
    }
    if body.is_empty() {
        Err(format!("admin API returned status {status}"))
    } else {
        Err(format!("admin API returned status {status}: {body}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn success_passes() {
        assert!(ensure_success(StatusCode::OK, "{}").is_ok());
    }

    #[test]
    fn unauthorized_is_an_error() {
        let err = ensure_success(StatusCode::UNAUTHORIZED, "").unwrap_err();
        assert!(err.contains("401"), "{err}");
    }

    #[test]
    fn error_carries_body() {
        let err = ensure_success(StatusCode::BAD_REQUEST, "missing path").unwrap_err();
        assert!(err.contains("400"), "{err}");
        assert!(err.contains("missing path"), "{err}");
    }
}
