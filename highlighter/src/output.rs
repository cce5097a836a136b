use common::HighlightResult;

use crate::Error;

pub async fn save_result(path: &str, result: &HighlightResult) -> Result<Option<std::path::PathBuf>, Error> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }

    let data = serde_json::to_vec_pretty(result).map_err(Error::Serialize)?;
    write_file(std::path::Path::new(path), &data).await?;

    Ok(Some(path.into()))
}

pub async fn write_script(path: &str, content: &str) -> Result<Option<std::path::PathBuf>, Error> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }

    write_file(std::path::Path::new(path), content.as_bytes()).await?;

    Ok(Some(path.into()))
}

async fn write_file(path: &std::path::Path, data: &[u8]) -> Result<(), Error> {
    let to_error = |source| Error::Write {
        path: path.to_owned(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(to_error)?;
    }
    tokio::fs::write(path, data).await.map_err(to_error)?;

    tracing::info!("saved {}", path.display());

    Ok(())
}
