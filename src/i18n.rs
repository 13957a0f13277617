// ==========================================
// RTB 商务提案系统 - 文案目录 (i18n)
// ==========================================
// 使用 rust-i18n 库
// 仅 pt-BR 一个语言（多语言不在范围内）
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 唯一支持的语言
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// 初始化语言（进程启动时调用一次）
pub fn init() {
    rust_i18n::set_locale(DEFAULT_LOCALE);
}

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use rtb_proposta::i18n::t;
/// let msg = t("validation.itensPrecos");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use rtb_proposta::i18n::t_with_args;
/// let msg = t_with_args("validation.missing", &[("label", "Nome do cliente")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale() {
        init();
        assert_eq!(current_locale(), DEFAULT_LOCALE);
    }

    #[test]
    fn test_translate_simple() {
        assert_eq!(t("validation.itensPrecos"), "Pelo menos um item é obrigatório");
        assert_eq!(t("session.unsupported_file"), "Por favor, selecione um arquivo de imagem válido.");
    }

    #[test]
    fn test_translate_with_args() {
        let msg = t_with_args("validation.missing", &[("label", "Nome do cliente")]);
        assert!(msg.starts_with("Nome do cliente"));
        assert!(!msg.contains("%{label}"));
    }
}
