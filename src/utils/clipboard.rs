// Clipboard - 시스템 클립보드 연동
//
// 터미널 앱이므로 OSC 52 이스케이프 시퀀스로 터미널 에뮬레이터의
// 클립보드에 텍스트를 전달한다.

use crate::utils::error::{MuError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::Write;
#[cfg(test)]
use std::sync::{Arc, Mutex};

/// 텍스트 클립보드 대상
pub trait ClipboardSink: Send {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// OSC 52 기반 클립보드 (stdout으로 전송)
#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl Osc52Clipboard {
    /// OSC 52 시퀀스 생성: `ESC ] 52 ; c ; <base64> BEL`
    pub fn sequence(text: &str) -> String {
        format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
    }
}

impl ClipboardSink for Osc52Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(Self::sequence(text).as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| MuError::Clipboard(e.to_string()))
    }
}

/// 메모리 클립보드
///
/// 복제본끼리 내용을 공유한다.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }
}

#[cfg(test)]
impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|e| MuError::Clipboard(e.to_string()))?;
        *guard = Some(text.to_string());
        Ok(())
    }
}
