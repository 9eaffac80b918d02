//! WhatsApp JID handling
//!
//! Inbound sender identifiers arrive as JIDs like `5511999999999@s.whatsapp.net`
//! (optionally with a `:device` part before the domain). Contacts are keyed by
//! the bare phone number.

/// Strip the domain suffix and device part from a JID, leaving the bare phone number.
///
/// Returns the input unchanged when it carries no suffix.
pub fn bare_phone(jid: &str) -> &str {
    let user = jid.split('@').next().unwrap_or(jid);
    user.split(':').next().unwrap_or(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_domain() {
        assert_eq!(bare_phone("5511999999999@s.whatsapp.net"), "5511999999999");
    }

    #[test]
    fn test_strips_device_part() {
        assert_eq!(bare_phone("5511999999999:12@s.whatsapp.net"), "5511999999999");
    }

    #[test]
    fn test_bare_number_passes_through() {
        assert_eq!(bare_phone("5511999999999"), "5511999999999");
    }

    #[test]
    fn test_group_jid_keeps_user_part() {
        assert_eq!(bare_phone("123456-789@g.us"), "123456-789");
    }
}
