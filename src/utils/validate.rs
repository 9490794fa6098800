use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{5,16}$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static HTTP_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("Invalid url regex"));

const WEAK_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "abcd1234",
    "escuela123",
    "colegio123",
];

/// 用户名：5-16 位字母、数字、下划线或连字符
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Username must be 5-16 characters of letters, numbers, underscores or hyphens",
        );
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 资料链接只接受 http/https
pub fn validate_http_url(url: &str) -> Result<(), &'static str> {
    if !HTTP_URL_RE.is_match(url.trim()) {
        return Err("URL must start with http:// or https://");
    }
    Ok(())
}

/// 去除首尾空白后校验必填文本的长度，返回整理后的文本
pub fn required_text(field: &str, value: &str, max_len: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("{field} must be at most {max_len} characters"));
    }
    Ok(trimmed.to_string())
}

/// 可选文本：空白字符串视为未填写
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 班级/年级统一为去空白的大写形式，例如 " 5a " -> "5A"
pub fn normalize_course(course: &str) -> Option<String> {
    let course = course.trim();
    if course.is_empty() {
        None
    } else {
        Some(course.to_uppercase())
    }
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 密码策略：至少 8 位，同时包含大写、小写字母和数字，且不是常见弱密码
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let checks: [(bool, &'static str); 4] = [
        (
            password.chars().count() >= 8,
            "Password must be at least 8 characters long",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Password must contain at least one uppercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Password must contain at least one lowercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Password must contain at least one digit",
        ),
    ];

    let mut errors: Vec<&'static str> = checks
        .iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, msg)| *msg)
        .collect();

    if WEAK_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("ana_g").is_ok());
        assert!(validate_username("prof-lopez2024").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("much_too_long_username").is_err());
        assert!(validate_username("ana garcia").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("ana@escuela.edu.ar").is_ok());
        assert!(validate_email("ana@escuela").is_err());
        assert!(validate_email("ana.escuela.com").is_err());
    }

    #[test]
    fn test_http_url() {
        assert!(validate_http_url("https://drive.example.com/file/1").is_ok());
        assert!(validate_http_url("http://example.com").is_ok());
        assert!(validate_http_url("ftp://example.com/a").is_err());
        assert!(validate_http_url("javascript:alert(1)").is_err());
        assert!(validate_http_url("https://").is_err());
    }

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("title", "  Hola ", 10).unwrap(), "Hola");
        assert!(required_text("title", "   ", 10).is_err());
        assert!(required_text("title", "abcdefghijk", 10).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(optional_text(Some(" 5A ".to_string())), Some("5A".to_string()));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_normalize_course() {
        assert_eq!(normalize_course(" 5a "), Some("5A".to_string()));
        assert_eq!(normalize_course("  "), None);
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecurePass123").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
    }

    #[test]
    fn test_password_collects_every_failure() {
        let result = validate_password("abc");
        assert!(!result.is_valid);
        assert!(result.errors.contains(&"Password must be at least 8 characters long"));
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
        assert!(result.errors.contains(&"Password must contain at least one digit"));
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Escuela123");
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Password is too common, please choose a stronger password"]
        );
    }
}
