use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tokio_util::sync::CancellationToken;

use lingolens_client::OllamaClient;
use lingolens_pipeline::{Analyzer, validate_description};
use lingolens_types::{AnalysisDocument, AnalysisInput, IMAGE_EXTENSIONS, ImageInput};

use crate::render;

/// Run one analysis against the model server and print the result.
pub async fn run_analyze(
    image: Option<PathBuf>,
    text: Option<String>,
    language: Option<String>,
    source_language: Option<String>,
    server: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let settings = lingolens_config::load_settings()?;
    let pair = crate::resolve_pair(&settings, language, source_language)?;
    let server = server.unwrap_or(settings.ollama_url);

    let input = match (image, text) {
        (Some(path), None) => AnalysisInput::Image(load_image(&path)?),
        (None, Some(text)) => AnalysisInput::Description(text),
        (None, None) => bail!("nothing to analyze: pass an image path or --text"),
        (Some(_), Some(_)) => bail!("pass either an image or --text, not both"),
    };

    // reject bad input before touching the network
    if let AnalysisInput::Description(desc) = &input {
        validate_description(desc)?;
    }

    let client = OllamaClient::new(&server);
    let status = client.check_connection().await;
    if !status.reachable {
        bail!("cannot reach model server at {server}; is Ollama running?");
    }
    if !status.model_available {
        tracing::warn!("no known model installed on {server}, generation may fail");
    }

    let analyzer = Analyzer::new(client, pair);
    let cancel = CancellationToken::new();
    let outcome = match &input {
        AnalysisInput::Image(img) => {
            println!(
                "Analyzing {} ({} -> {})...",
                img.name,
                pair.source.display_name(),
                pair.target.display_name()
            );
            analyzer.analyze_image(img, &cancel).await?
        }
        AnalysisInput::Description(desc) => {
            println!(
                "Analyzing description ({} -> {})...",
                pair.source.display_name(),
                pair.target.display_name()
            );
            analyzer.analyze_description(desc, &cancel).await?
        }
    };

    render::print_result(&outcome.result, pair);

    if outcome.is_partial() {
        for failure in &outcome.failures {
            eprintln!("[{} stage failed: {}]", failure.stage, failure.error);
        }
    }

    if let Some(path) = output {
        let doc = AnalysisDocument::new(&input, pair, outcome.result);
        let json = serde_json::to_string_pretty(&doc)?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("Saved analysis to {}", path.display());
    }

    Ok(())
}

/// Probe the model server and report its status.
pub async fn run_check(server: Option<String>) -> Result<()> {
    let settings = lingolens_config::load_settings()?;
    let server = server.unwrap_or(settings.ollama_url);

    let client = OllamaClient::new(&server);
    let status = client.check_connection().await;
    println!("server: {server}");
    println!("  reachable:       {}", if status.reachable { "yes" } else { "no" });
    println!("  model installed: {}", if status.model_available { "yes" } else { "no" });
    if !status.reachable {
        bail!("model server is not reachable");
    }
    Ok(())
}

fn load_image(path: &Path) -> Result<ImageInput> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let mime = ImageInput::mime_for_extension(ext).ok_or_else(|| {
        anyhow::anyhow!(
            "unsupported image type {ext:?} (expected one of: {})",
            IMAGE_EXTENSIONS.join(", ")
        )
    })?;
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    Ok(ImageInput {
        name,
        mime_type: mime.to_string(),
        bytes,
    })
}
