//! Clipboard: copy the JSON preview to the system clipboard

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("剪贴板不可用: {0}")]
    Unavailable(String),
    #[error("写入剪贴板失败: {0}")]
    Write(String),
}

/// 将预览文本复制到系统剪贴板
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    use copypasta::{ClipboardContext, ClipboardProvider};
    let mut ctx = ClipboardContext::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    ctx.set_contents(text.to_string())
        .map_err(|e| ClipboardError::Write(e.to_string()))?;
    tracing::debug!("已写入剪贴板: {} 字符", text.len());
    Ok(())
}

#[cfg(test)]
fn read_clipboard() -> Result<String, ClipboardError> {
    use copypasta::{ClipboardContext, ClipboardProvider};
    let mut ctx = ClipboardContext::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    ctx.get_contents()
        .map_err(|e| ClipboardError::Unavailable(e.to_string()))
}
