use chrono::{TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::*;
use crate::errors::TokenError;

const SECRET: &str = "test-secret-key";

fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    ))
}

#[test]
fn test_sign_and_unsign_round_trip() {
    let signer = TimestampSigner::with_clock(SECRET, "salt", fixed_clock());
    let token = signer.sign("hello world").unwrap();

    assert_eq!(token.matches(SEPARATOR).count(), 2);
    assert_eq!(
        signer.unsign(&token, Duration::from_secs(60)).unwrap(),
        "hello world"
    );
}

#[test]
fn test_token_alphabet_is_url_safe() {
    let codec = ActivationCodec::with_clock(SECRET, fixed_clock());
    let token = codec.encode(Uuid::new_v4()).unwrap();

    assert!(token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == SEPARATOR));
}

#[test]
fn test_activation_round_trip() {
    let codec = ActivationCodec::with_clock(SECRET, fixed_clock());
    let id = Uuid::new_v4();

    let token = codec.encode(id).unwrap();
    assert_eq!(codec.decode(&token, 86400).unwrap(), id);
}

#[test]
fn test_encode_is_deterministic_for_same_instant() {
    let clock = fixed_clock();
    let codec = ActivationCodec::with_clock(SECRET, clock);
    let id = Uuid::new_v4();

    assert_eq!(codec.encode(id).unwrap(), codec.encode(id).unwrap());
}

#[test]
fn test_expiry_boundary() {
    let clock = fixed_clock();
    let codec = ActivationCodec::with_clock(SECRET, clock.clone());
    let id = Uuid::new_v4();
    let token = codec.encode(id).unwrap();

    clock.advance_seconds(86400);
    assert_eq!(codec.decode(&token, 86400).unwrap(), id);

    clock.advance_seconds(1);
    assert_eq!(
        codec.decode(&token, 86400),
        Err(TokenError::SignatureExpired)
    );
}

#[test]
fn test_zero_max_age_accepts_same_second() {
    let codec = ActivationCodec::with_clock(SECRET, fixed_clock());
    let id = Uuid::new_v4();
    let token = codec.encode(id).unwrap();

    assert_eq!(codec.decode(&token, 0).unwrap(), id);
}

#[test]
fn test_unbounded_max_age_never_expires() {
    let clock = fixed_clock();
    let codec = ActivationCodec::with_clock(SECRET, clock.clone());
    let id = Uuid::new_v4();
    let token = codec.encode(id).unwrap();

    clock.advance_seconds(10 * 365 * 86400);
    assert_eq!(codec.decode(&token, u64::MAX).unwrap(), id);
}

#[test]
fn test_any_single_character_change_is_rejected() {
    let codec = ActivationCodec::with_clock(SECRET, fixed_clock());
    let token = codec.encode(Uuid::new_v4()).unwrap();

    for (index, original) in token.char_indices() {
        let replacement = if original == 'A' { 'B' } else { 'A' };
        let mut tampered = token.clone();
        tampered.replace_range(index..index + 1, &replacement.to_string());

        assert_eq!(
            codec.decode(&tampered, 86400),
            Err(TokenError::SignatureInvalid),
            "tampered at index {}",
            index
        );
    }
}

#[test]
fn test_tampered_token_reports_invalid_even_when_expired() {
    let clock = fixed_clock();
    let codec = ActivationCodec::with_clock(SECRET, clock.clone());
    let mut token = codec.encode(Uuid::new_v4()).unwrap();
    token.push('x');

    clock.advance_seconds(1_000_000);
    assert_eq!(
        codec.decode(&token, 10),
        Err(TokenError::SignatureInvalid)
    );
}

#[test]
fn test_wrong_secret_is_rejected() {
    let clock = fixed_clock();
    let issuer = ActivationCodec::with_clock(SECRET, clock.clone());
    let verifier = ActivationCodec::with_clock("rotated-secret", clock);

    let token = issuer.encode(Uuid::new_v4()).unwrap();
    assert_eq!(
        verifier.decode(&token, 86400),
        Err(TokenError::SignatureInvalid)
    );
}

#[test]
fn test_salts_do_not_accept_each_other() {
    let clock = fixed_clock();
    let activation = TimestampSigner::with_clock(SECRET, ACTIVATION_SALT, clock.clone());
    let other = TimestampSigner::with_clock(SECRET, "registration.password_reset", clock);

    let token = other.sign(&Uuid::new_v4().to_string()).unwrap();
    assert_eq!(
        activation.unsign(&token, Duration::from_secs(60)),
        Err(TokenError::SignatureInvalid)
    );
}

#[test]
fn test_malformed_tokens_are_invalid() {
    let codec = ActivationCodec::with_clock(SECRET, fixed_clock());

    for token in ["", ":", "::", "abc", "a:b", "a:b:c:d", "not a token at all"] {
        assert_eq!(
            codec.decode(token, 86400),
            Err(TokenError::SignatureInvalid),
            "token {:?}",
            token
        );
    }
}

#[test]
fn test_validly_signed_non_uuid_is_invalid() {
    let clock = fixed_clock();
    let signer = TimestampSigner::with_clock(SECRET, ACTIVATION_SALT, clock.clone());
    let codec = ActivationCodec::with_clock(SECRET, clock);

    let token = signer.sign("not-a-uuid").unwrap();
    assert_eq!(
        codec.decode(&token, 86400),
        Err(TokenError::SignatureInvalid)
    );
}

#[test]
fn test_system_clock_codec_round_trip() {
    let codec = ActivationCodec::new(SECRET);
    let id = Uuid::new_v4();
    let token = codec.encode(id).unwrap();

    assert_eq!(codec.decode(&token, 60).unwrap(), id);
}

#[test]
fn test_password_reset_round_trip() {
    let codec = PasswordResetCodec::with_clock(SECRET, fixed_clock());
    let user = crate::domain::entities::user::User::new(
        "u@example.com".to_string(),
        "$2b$04$somehash".to_string(),
    );

    let token = codec.encode(&user).unwrap();
    let claims = codec.decode(&token, 259200).unwrap();

    assert_eq!(claims.user_id, user.id);
    assert!(claims.matches(&user));
}

#[test]
fn test_password_reset_token_void_after_password_change() {
    let codec = PasswordResetCodec::with_clock(SECRET, fixed_clock());
    let mut user = crate::domain::entities::user::User::new(
        "u@example.com".to_string(),
        "$2b$04$oldhash".to_string(),
    );
    let token = codec.encode(&user).unwrap();

    user.set_password_hash("$2b$04$newhash".to_string());
    let claims = codec.decode(&token, 259200).unwrap();
    assert!(!claims.matches(&user));
}

#[test]
fn test_activation_token_is_not_a_reset_token() {
    let clock = fixed_clock();
    let activation = ActivationCodec::with_clock(SECRET, clock.clone());
    let reset = PasswordResetCodec::with_clock(SECRET, clock);

    let token = activation.encode(Uuid::new_v4()).unwrap();
    assert_eq!(reset.decode(&token, 259200), Err(TokenError::SignatureInvalid));
}

#[test]
fn test_fingerprint_is_stable_and_short() {
    assert_eq!(password_fingerprint("abc"), password_fingerprint("abc"));
    assert_ne!(password_fingerprint("abc"), password_fingerprint("abd"));
    assert_eq!(password_fingerprint("abc").len(), 24);
}
