// ==========================================
// RTB 商务提案系统 - 客户 Logo 接收
// ==========================================
// 规则: 仅接受 image/* 类型；拒绝时原有 logo 不变
// ==========================================

use serde::{Deserialize, Serialize};

use crate::app::error::SessionError;

/// 已接受的 logo 文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoAttachment {
    pub file_name: String,
    pub mime_type: String,
    /// 渲染器用于显示的地址（通常为 data URL）
    pub url: String,
}

/// 校验上传文件类型
pub fn accept_logo(
    file_name: &str,
    mime_type: &str,
    url: &str,
) -> Result<LogoAttachment, SessionError> {
    let normalized = mime_type.trim().to_ascii_lowercase();
    if !normalized.starts_with("image/") {
        tracing::warn!(file_name, mime_type, "拒绝非图片文件");
        return Err(SessionError::UnsupportedFile {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
        });
    }

    Ok(LogoAttachment {
        file_name: file_name.to_string(),
        mime_type: normalized,
        url: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_image_types() {
        let logo = accept_logo("acme.png", "image/png", "data:image/png;base64,AAAA").unwrap();
        assert_eq!(logo.file_name, "acme.png");
        assert_eq!(logo.url, "data:image/png;base64,AAAA");
        assert!(accept_logo("acme.svg", "IMAGE/SVG+XML", "blob:acme").is_ok());
    }

    #[test]
    fn test_reject_non_image() {
        let err = accept_logo("contrato.pdf", "application/pdf", "data:application/pdf;base64,AAAA")
            .unwrap_err();
        assert!(matches!(err, SessionError::UnsupportedFile { .. }));
        assert!(accept_logo("sem-tipo", "", "").is_err());
    }
}
