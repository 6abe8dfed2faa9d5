use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use tracing::debug;

use shared_models::auth::{AuthUser, JwtClaims};

type HmacSha256 = Hmac<Sha256>;

/// Issued tokens expire after one hour.
pub const TOKEN_TTL_HOURS: i64 = 1;

/// Verify an HS256 bearer token and extract the caller identity.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<AuthUser, String> {
    if jwt_secret.is_empty() {
        return Err("Token secret is not set".to_string());
    }

    // Split token into parts
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid token format".to_string());
    }

    let header_b64 = parts[0];
    let claims_b64 = parts[1];
    let signature_b64 = parts[2];

    let signature = match URL_SAFE_NO_PAD.decode(signature_b64) {
        Ok(sig) => sig,
        Err(e) => {
            debug!("Failed to decode signature: {}", e);
            return Err("Invalid signature encoding".to_string());
        }
    };

    let signing_input = format!("{}.{}", header_b64, claims_b64);

    let mut mac = match HmacSha256::new_from_slice(jwt_secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return Err("Failed to create HMAC".to_string()),
    };

    mac.update(signing_input.as_bytes());

    if mac.verify_slice(&signature).is_err() {
        debug!("Token signature verification failed");
        return Err("Invalid token signature".to_string());
    }

    // Decode claims
    let claims_json = match URL_SAFE_NO_PAD.decode(claims_b64) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(json_str) => json_str,
            Err(_) => return Err("Invalid claims encoding".to_string()),
        },
        Err(_) => return Err("Invalid claims encoding".to_string()),
    };

    let claims: JwtClaims = match serde_json::from_str(&claims_json) {
        Ok(c) => c,
        Err(e) => {
            debug!("Failed to parse claims: {}", e);
            return Err("Invalid claims format".to_string());
        }
    };

    // Check expiration
    if let Some(exp) = claims.exp {
        let now = Utc::now().timestamp() as u64;
        if exp < now {
            debug!("Token expired at {} (now: {})", exp, now);
            return Err("Token expired".to_string());
        }
    }

    let user = AuthUser {
        email: claims.email.unwrap_or(claims.sub),
        role: claims.role,
    };

    debug!("Token validated successfully for {}", user.email);
    Ok(user)
}

/// Issue a fresh HS256 bearer token for an email, valid for one hour.
pub fn issue_token(email: &str, role: Option<&str>, jwt_secret: &str) -> Result<String, String> {
    if jwt_secret.is_empty() {
        return Err("Token secret is not set".to_string());
    }

    let now = Utc::now();
    let exp = now + Duration::hours(TOKEN_TTL_HOURS);

    let header = json!({
        "alg": "HS256",
        "typ": "JWT"
    });

    let claims = json!({
        "sub": email,
        "email": email,
        "role": role,
        "iat": now.timestamp(),
        "exp": exp.timestamp()
    });

    let header_encoded = URL_SAFE_NO_PAD.encode(header.to_string());
    let claims_encoded = URL_SAFE_NO_PAD.encode(claims.to_string());

    let signing_input = format!("{}.{}", header_encoded, claims_encoded);

    let mut mac = HmacSha256::new_from_slice(jwt_secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-token-validation-must-be-long-enough";

    #[test]
    fn issued_token_round_trips() {
        let token = issue_token("patient@example.com", None, SECRET).unwrap();
        let user = validate_token(&token, SECRET).unwrap();

        assert_eq!(user.email, "patient@example.com");
        assert_eq!(user.role, None);
    }

    #[test]
    fn issued_token_carries_role() {
        let token = issue_token("boss@example.com", Some("admin"), SECRET).unwrap();
        let user = validate_token(&token, SECRET).unwrap();

        assert_eq!(user.role, Some("admin".to_string()));
    }

    #[test]
    fn forged_token_is_rejected() {
        let token = issue_token("patient@example.com", None, "wrong-secret").unwrap();

        assert!(validate_token(&token, SECRET).is_err());
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(validate_token("not.a-token", SECRET).is_err());
        assert!(validate_token("", SECRET).is_err());
    }

    #[test]
    fn empty_secret_never_validates() {
        let token = issue_token("patient@example.com", None, SECRET).unwrap();

        assert!(validate_token(&token, "").is_err());
    }
}
