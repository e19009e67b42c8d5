//! Log-safe masking of contact addresses.

/// Mask the local part of an e-mail address for logging.
///
/// Keeps the first two characters when the local part is longer than two
/// characters, otherwise masks it entirely. The domain is kept.
///
/// ```
/// use eventide_core::mask_email;
///
/// assert_eq!(mask_email("alice@x.com"), "al****@x.com");
/// assert_eq!(mask_email("al@x.com"), "****@x.com");
/// assert_eq!(mask_email(""), "");
/// ```
#[must_use]
pub fn mask_email(email: &str) -> String {
    if email.trim().is_empty() {
        return String::new();
    }

    let Some(at) = email.find('@') else {
        return "****".to_owned();
    };

    let local = &email[..at];
    let domain = &email[at..];
    if local.chars().count() <= 2 {
        return format!("****{domain}");
    }

    let prefix: String = local.chars().take(2).collect();
    format!("{prefix}****{domain}")
}
