use std::fs;
use std::path::Path;

use crate::error::{ServerError, ServerResult};

const SOCKET_HOST_PLACEHOLDER: &str = "SOCKET_HOST";

fn read_resource(dir: &Path, name: &str) -> ServerResult<Vec<u8>> {
    let path = dir.join(name);
    fs::read(&path).map_err(|source| ServerError::Resource { path, source })
}

fn read_js_with_endpoint(dir: &Path, ws_endpoint: &str) -> ServerResult<Vec<u8>> {
    let path = dir.join("app.js");
    let javascript =
        fs::read_to_string(&path).map_err(|source| ServerError::Resource { path, source })?;
    Ok(javascript
        .replace(SOCKET_HOST_PLACEHOLDER, ws_endpoint)
        .into_bytes())
}

/// Page assets, read once at startup.
#[derive(Debug)]
pub struct StaticResource {
    pub(crate) homepage: Vec<u8>,
    pub(crate) javascript: Vec<u8>,
    pub(crate) css: Vec<u8>,
}

impl StaticResource {
    pub fn load(dir: &Path, ws_endpoint: &str) -> ServerResult<StaticResource> {
        Ok(StaticResource {
            homepage: read_resource(dir, "index.html")?,
            javascript: read_js_with_endpoint(dir, ws_endpoint)?,
            css: read_resource(dir, "grid.css")?,
        })
    }
}
