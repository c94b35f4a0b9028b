//! List the models an Open WebUI-compatible backend currently serves.
//!
//! # Usage
//!
//! ```bash
//! OPENWEBUI_API_URL=http://localhost:8080 OPENWEBUI_API_KEY=sk-... parley-models
//! ```

use parley::OpenWebUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = OpenWebUi::new(None)?;

    let models = client.list_models().await?;
    if models.is_empty() {
        println!("The backend at {} serves no models.", client.base_url());
        return Ok(());
    }

    println!("Models served by {}:", client.base_url());
    for model in &models {
        println!("- {model}");
    }

    Ok(())
}
