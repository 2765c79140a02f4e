use super::*;

// =============================================================================
// bytes_to_hex / generate_token
// =============================================================================

#[test]
fn bytes_to_hex_pads_each_byte() {
    assert_eq!(bytes_to_hex(&[]), "");
    assert_eq!(bytes_to_hex(&[0x0a, 0xff]), "0aff");
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

#[test]
fn generate_token_is_64_hex_chars_and_unique() {
    let a = generate_token();
    let b = generate_token();
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, b);
}

// =============================================================================
// TokenIssuer
// =============================================================================

#[test]
fn issued_access_token_validates_to_user() {
    let mut issuer = TokenIssuer::new(Duration::from_secs(60));
    let pair = issuer.issue("admin");
    assert_ne!(pair.access_token, pair.refresh_token);
    assert_eq!(issuer.validate(&pair.access_token).as_deref(), Some("admin"));
    assert_eq!(issuer.validate(&pair.refresh_token), None);
    assert_eq!(issuer.validate("nope"), None);
}

#[test]
fn expired_access_token_is_rejected() {
    let mut issuer = TokenIssuer::new(Duration::ZERO);
    let pair = issuer.issue("admin");
    assert_eq!(issuer.validate(&pair.access_token), None);
}

#[test]
fn refresh_mints_new_access_token() {
    let mut issuer = TokenIssuer::new(Duration::from_secs(60));
    let first = issuer.issue("admin");
    let (username, second) = issuer.refresh(&first.refresh_token).expect("refresh");

    assert_eq!(username, "admin");
    assert_eq!(second.refresh_token, first.refresh_token);
    assert_ne!(second.access_token, first.access_token);
    assert_eq!(issuer.validate(&second.access_token).as_deref(), Some("admin"));
    assert_eq!(issuer.refresh("unknown"), Err(TokenError::UnknownRefreshToken));
}

#[test]
fn revoke_user_drops_all_their_tokens() {
    let mut issuer = TokenIssuer::new(Duration::from_secs(60));
    let admin = issuer.issue("admin");
    let other = issuer.issue("other");
    issuer.revoke_user("admin");

    assert_eq!(issuer.validate(&admin.access_token), None);
    assert!(issuer.refresh(&admin.refresh_token).is_err());
    assert_eq!(issuer.validate(&other.access_token).as_deref(), Some("other"));
}

#[test]
fn expired_refresh_token_is_rejected_and_forgotten() {
    let mut issuer = TokenIssuer::new(Duration::from_secs(60)).with_refresh_ttl(Duration::ZERO);
    let pair = issuer.issue("admin");
    assert_eq!(issuer.refresh(&pair.refresh_token), Err(TokenError::UnknownRefreshToken));
    assert!(issuer.refresh.is_empty());
}

#[test]
fn repeated_logins_do_not_accumulate_dead_grants() {
    let mut issuer = TokenIssuer::new(Duration::ZERO).with_refresh_ttl(Duration::ZERO);
    for _ in 0..1000 {
        issuer.issue("admin");
    }
    assert_eq!(issuer.refresh.len(), 1);
    assert_eq!(issuer.access.len(), 1);
}

#[test]
fn default_refresh_ttl_is_thirty_days() {
    let mut issuer = TokenIssuer::new(Duration::from_secs(60));
    assert_eq!(issuer.refresh_ttl, REFRESH_TOKEN_TTL);
    let pair = issuer.issue("admin");
    assert!(issuer.refresh(&pair.refresh_token).is_ok());
}
