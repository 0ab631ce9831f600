//! Email derivation for Descope users that lack a usable `email` field.

use regex::Regex;
use serde_json::Value;
use sha2::{Digest, Sha256};
use unicode_normalization::UnicodeNormalization;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const EMBEDDED_EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";
const GENERATED_DOMAIN: &str = "example.com";
const SOCIAL_PROVIDERS: [&str; 3] = ["google", "github", "facebook"];
const PREFIXES: [&str; 9] = [
    "user:",
    "email:",
    "login:",
    "id:",
    "uid:",
    "mail:",
    "contact:",
    "username:",
    "account:",
];
const OBFUSCATIONS: [(&str, &str); 16] = [
    ("%40", "@"),
    ("＠", "@"),
    ("﹫", "@"),
    ("［at］", "@"),
    ("[at]", "@"),
    ("(at)", "@"),
    ("{at}", "@"),
    ("<at>", "@"),
    ("［dot］", "."),
    ("[dot]", "."),
    ("(dot)", "."),
    ("{dot}", "."),
    ("<dot>", "."),
    ("．", "."),
    ("。", "."),
    (" dot ", "."),
];

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 || email.contains(' ') {
        return false;
    }

    if !Regex::new(EMAIL_PATTERN).is_ok_and(|re| re.is_match(email)) {
        return false;
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && local.len() <= 64
        && !local.contains(['<', '>', '(', ')', '[', ']', '\\', ',', ';', ':'])
}

/// Undo common obfuscations and return the first address found in `text`.
/// Falls back to the cleaned text, which the caller validates.
#[must_use]
pub fn clean_potential_email(text: &str) -> String {
    let mut cleaned = text.trim().to_lowercase();

    if let Some(rest) = PREFIXES
        .iter()
        .find_map(|prefix| cleaned.strip_prefix(prefix))
    {
        cleaned = rest.to_string();
    }

    if let Ok(re) = Regex::new(r"\s+at\s+") {
        cleaned = re.replace_all(&cleaned, "@").into_owned();
    }

    for (from, to) in OBFUSCATIONS {
        cleaned = cleaned.replace(from, to);
    }

    cleaned.retain(|c| !c.is_whitespace());

    Regex::new(EMBEDDED_EMAIL_PATTERN)
        .ok()
        .and_then(|re| {
            re.find_iter(&cleaned)
                .map(|m| m.as_str())
                .find(|candidate| is_valid_email(candidate))
                .map(str::to_string)
        })
        .unwrap_or(cleaned)
}

/// The id part of a `provider-id` social login, for known providers.
#[must_use]
pub fn extract_social_id(login_id: &str) -> Option<&str> {
    let (provider, id) = login_id.split_once('-')?;
    (SOCIAL_PROVIDERS.contains(&provider) && !id.is_empty()).then_some(id)
}

/// Fold to ASCII, lowercase, keep `[a-z0-9]`, join words with dots.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let folded: String = name
        .nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(".")
}

#[must_use]
pub fn generate_email_from_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return None;
    }

    let mut local = normalize_name(name);
    if local.is_empty() {
        let digest = format!("{:x}", Sha256::digest(name.as_bytes()));
        local = format!("user{}", &digest[..8]);
    }

    Some(format!("{local}@{GENERATED_DOMAIN}"))
}

/// Human name of a user: `name` (string, or `displayName` / `firstName lastName`
/// when an object), else `givenName familyName`.
#[must_use]
pub fn display_name(user: &Value) -> Option<String> {
    let joined = |first: Option<&Value>, last: Option<&Value>| {
        let full = format!(
            "{} {}",
            first.and_then(Value::as_str).unwrap_or_default(),
            last.and_then(Value::as_str).unwrap_or_default()
        );
        let full = full.trim();
        (!full.is_empty()).then(|| full.to_string())
    };

    match user.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => Some(name.clone()),
        Some(Value::Object(name)) => name
            .get("displayName")
            .and_then(Value::as_str)
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string)
            .or_else(|| joined(name.get("firstName"), name.get("lastName"))),
        _ => joined(user.get("givenName"), user.get("familyName")),
    }
}

/// Best-effort email for a Descope user; empty when nothing usable exists.
#[must_use]
pub fn extract_email(user: &Value) -> String {
    let valid_cleaned = |text: &str| {
        let cleaned = clean_potential_email(text);
        is_valid_email(&cleaned).then_some(cleaned)
    };

    let fields = match user {
        Value::String(text) => return valid_cleaned(text.as_str()).unwrap_or_default(),
        Value::Object(fields) => fields,
        _ => return String::new(),
    };

    if let Some(email) = fields
        .get("email")
        .and_then(Value::as_str)
        .filter(|email| is_valid_email(email))
    {
        return email.to_string();
    }

    let name = display_name(user);

    let login_ids = fields
        .get("loginIds")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str);
    for login_id in login_ids {
        if let Some(email) = valid_cleaned(login_id) {
            return email;
        }
        if extract_social_id(login_id).is_some()
            && let Some(email) = name.as_deref().and_then(generate_email_from_name)
        {
            return email;
        }
    }

    if let Some(email) = fields
        .get("userId")
        .and_then(Value::as_str)
        .and_then(valid_cleaned)
    {
        return email;
    }

    let custom = fields
        .get("customAttributes")
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|attrs| attrs.values())
        .filter_map(Value::as_str);
    for value in custom {
        if let Some(email) = valid_cleaned(value) {
            return email;
        }
    }

    name.as_deref()
        .and_then(generate_email_from_name)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_emails() {
        assert!(is_valid_email("jane.doe@example.com"));
        assert!(is_valid_email("a+tag@sub.example.co"));
    }

    #[test]
    fn invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("jane doe@example.com"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane@.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(&format!("{}@example.com", "a".repeat(65))));
        assert!(!is_valid_email(&format!("a@{}.com", "b".repeat(250))));
    }

    #[test]
    fn cleans_prefixes_and_obfuscations() {
        assert_eq!(clean_potential_email("Email: Jane@Example.com"), "jane@example.com");
        assert_eq!(clean_potential_email("jane[at]example[dot]com"), "jane@example.com");
        assert_eq!(clean_potential_email("jane at example.com"), "jane@example.com");
        assert_eq!(clean_potential_email("jane%40example.com"), "jane@example.com");
        assert_eq!(clean_potential_email("jane＠example．com"), "jane@example.com");
        assert_eq!(
            clean_potential_email("login: <Jane@Example.com>"),
            "jane@example.com"
        );
    }

    #[test]
    fn cleaning_keeps_words_containing_at_or_dot() {
        assert_eq!(clean_potential_email("atlas@dotcom.io"), "atlas@dotcom.io");
    }

    #[test]
    fn cleaning_without_address_returns_text() {
        assert_eq!(clean_potential_email("  Google-12345 "), "google-12345");
    }

    #[test]
    fn social_ids() {
        assert_eq!(extract_social_id("google-12345"), Some("12345"));
        assert_eq!(extract_social_id("github-a-b"), Some("a-b"));
        assert_eq!(extract_social_id("facebook-"), None);
        assert_eq!(extract_social_id("twitter-12345"), None);
        assert_eq!(extract_social_id("plain"), None);
    }

    #[test]
    fn normalizes_international_names() {
        assert_eq!(normalize_name("José  Müller"), "jose.muller");
        assert_eq!(normalize_name(" O'Brien-Smith "), "obriensmith");
        assert_eq!(normalize_name("李小龙"), "");
    }

    #[test]
    fn generates_from_names() {
        assert_eq!(
            generate_email_from_name("José Müller"),
            Some("jose.muller@example.com".to_string())
        );
        assert_eq!(generate_email_from_name("   "), None);

        let hashed = generate_email_from_name("李小龙");
        assert!(hashed.as_deref().is_some_and(|e| {
            e.starts_with("user") && e.ends_with("@example.com") && e.len() == "user".len() + 8 + "@example.com".len()
        }));
        // stable across runs
        assert_eq!(hashed, generate_email_from_name("李小龙"));
    }

    #[test]
    fn display_name_sources() {
        assert_eq!(display_name(&json!({ "name": "Jane Doe" })), Some("Jane Doe".to_string()));
        assert_eq!(
            display_name(&json!({ "name": { "displayName": "JD" } })),
            Some("JD".to_string())
        );
        assert_eq!(
            display_name(&json!({ "name": { "firstName": "Jane", "lastName": "Doe" } })),
            Some("Jane Doe".to_string())
        );
        assert_eq!(
            display_name(&json!({ "givenName": "Jane", "familyName": "Doe" })),
            Some("Jane Doe".to_string())
        );
        assert_eq!(display_name(&json!({ "name": "" })), None);
        assert_eq!(display_name(&json!({})), None);
    }

    #[test]
    fn extract_prefers_provider_email() {
        let user = json!({
            "userId": "U1",
            "email": "jane@example.org",
            "loginIds": ["other@example.net"]
        });
        assert_eq!(extract_email(&user), "jane@example.org");
    }

    #[test]
    fn extract_from_login_ids() {
        let user = json!({ "userId": "U1", "email": "", "loginIds": ["Jane[at]Example.com"] });
        assert_eq!(extract_email(&user), "jane@example.com");
    }

    #[test]
    fn extract_from_social_login_and_name() {
        let user = json!({ "userId": "U1", "loginIds": ["google-123"], "name": "Jane Doe" });
        assert_eq!(extract_email(&user), "jane.doe@example.com");
    }

    #[test]
    fn extract_from_user_id() {
        let user = json!({ "userId": "email:jane@example.com", "loginIds": ["phone-1"] });
        assert_eq!(extract_email(&user), "jane@example.com");
    }

    #[test]
    fn extract_from_custom_attributes() {
        let user = json!({
            "userId": "U1",
            "customAttributes": { "country": "DE", "contact": "jane(at)example.com" }
        });
        assert_eq!(extract_email(&user), "jane@example.com");
    }

    #[test]
    fn extract_falls_back_to_name_then_empty() {
        let named = json!({ "userId": "U1", "givenName": "Jane", "familyName": "Doe" });
        assert_eq!(extract_email(&named), "jane.doe@example.com");

        let anonymous = json!({ "userId": "U1" });
        assert_eq!(extract_email(&anonymous), "");
    }

    #[test]
    fn extract_from_bare_string() {
        assert_eq!(extract_email(&json!("Jane@Example.com")), "jane@example.com");
        assert_eq!(extract_email(&json!("U2abc")), "");
        assert_eq!(extract_email(&json!(42)), "");
    }
}
