//! Redemption link and QR-service URL composition. The QR image itself is
//! rendered by the external service; this module only builds URLs.

use uuid::Uuid;

const QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// `<origin>/signup?token=<t>&email=<e>&boardId=<b>`
pub fn invite_link(origin: &str, token: &str, email: &str, board_id: Uuid) -> String {
    format!(
        "{}/signup?token={}&email={}&boardId={}",
        origin.trim_end_matches('/'),
        urlencoding::encode(token),
        urlencoding::encode(email),
        board_id
    )
}

/// External QR renderer keyed by the redemption link.
pub fn qr_code_url(link: &str) -> String {
    format!("{QR_ENDPOINT}?size=200x200&data={}", urlencoding::encode(link))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_link_embeds_all_three_fields() {
        let board_id = Uuid::new_v4();
        let link = invite_link("http://localhost:3000", "tok123", "a@b.c", board_id);
        assert!(link.starts_with("http://localhost:3000/signup?"));
        assert!(link.contains("token=tok123"));
        assert!(link.contains("email=a%40b.c"));
        assert!(link.contains(&format!("boardId={board_id}")));
    }

    #[test]
    fn trailing_slash_on_origin_is_tolerated() {
        let link = invite_link("https://boards.example.com/", "t", "x@y.z", Uuid::nil());
        assert!(link.starts_with("https://boards.example.com/signup?"));
    }

    #[test]
    fn qr_url_wraps_the_encoded_link() {
        let link = invite_link("http://localhost:3000", "tok", "a@b.c", Uuid::nil());
        let qr = qr_code_url(&link);
        assert!(qr.starts_with("https://api.qrserver.com/v1/create-qr-code/?size=200x200&data="));
        // The link arrives percent-encoded, never raw
        assert!(qr.contains("http%3A%2F%2Flocalhost%3A3000%2Fsignup"));
        assert!(!qr.contains("signup?token"));
    }
}
