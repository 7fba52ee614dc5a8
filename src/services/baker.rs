// src/services/baker.rs
//! Image baking.
//!
//! Embeds a signed credential into a badge's image asset so the image file
//! itself becomes a standalone, independently verifiable artifact. PNG
//! baking is a binary chunk edit (one `iTXt` chunk inserted, everything
//! else byte-identical); SVG baking is a targeted attribute injection on
//! the root element. Both have matching extractors so a baked image can be
//! re-parsed back into the credential it carries.

use log::debug;

use crate::error::BakeError;
use crate::models::credential::OpenBadgeCredential;
use crate::utils::png::{self, Chunk};
use crate::utils::serialization;

/// Keyword identifying the credential chunk inside a baked PNG.
pub const BADGE_KEYWORD: &str = "openbadges";

/// Namespace bound to the `openbadges` prefix in baked SVG markup.
pub const OPENBADGES_NAMESPACE: &str = "https://purl.imsglobal.org/ob/v3p0";

/// Builds the uncompressed international-text chunk carrying the
/// credential JSON: keyword, null, compression flag 0, compression method
/// 0, empty language tag, empty translated keyword, then the text.
fn badge_chunk(json: &str) -> Chunk {
    let mut payload = Vec::with_capacity(BADGE_KEYWORD.len() + 5 + json.len());
    payload.extend_from_slice(BADGE_KEYWORD.as_bytes());
    payload.push(0); // keyword terminator
    payload.push(0); // compression flag: uncompressed
    payload.push(0); // compression method
    payload.push(0); // empty language tag
    payload.push(0); // empty translated keyword
    payload.extend_from_slice(json.as_bytes());
    Chunk::new(*b"iTXt", payload)
}

/// Splits an `iTXt` payload and returns its text when the keyword matches.
fn itxt_text<'a>(payload: &'a [u8], keyword: &str) -> Option<&'a [u8]> {
    let keyword_end = payload.iter().position(|byte| *byte == 0)?;
    if &payload[..keyword_end] != keyword.as_bytes() {
        return None;
    }
    let rest = &payload[keyword_end + 1..];
    // compression flag must be 0 (uncompressed), method byte follows
    if rest.len() < 2 || rest[0] != 0 {
        return None;
    }
    let rest = &rest[2..];
    let language_end = rest.iter().position(|byte| *byte == 0)?;
    let rest = &rest[language_end + 1..];
    let translated_end = rest.iter().position(|byte| *byte == 0)?;
    Some(&rest[translated_end + 1..])
}

/// Bakes a signed credential into a PNG supplied as a base64 data URL.
///
/// The credential JSON lands in an `iTXt` chunk inserted immediately
/// before the first `IDAT` chunk (or before the terminator when the stream
/// has no image data). All existing chunks pass through byte-identical, so
/// the result stays a valid, renderable PNG.
///
/// # Errors
/// [`BakeError`] when the input is not a base64 data URL or the PNG chunk
/// stream is malformed — the caller never receives a silently-corrupt
/// image.
pub fn bake_png(
    image_data_url: &str,
    credential: &OpenBadgeCredential,
) -> Result<Vec<u8>, BakeError> {
    let encoded = image_data_url
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once("base64,"))
        .map(|(_, payload)| payload)
        .ok_or(BakeError::DataUrl)?;
    let bytes = base64::decode(encoded)?;
    let chunks = png::parse(&bytes)?;

    let json = serialization::to_json(credential)?;
    let chunks = png::insert_before(chunks, Chunk::is_image_data, badge_chunk(&json));
    debug!(
        "baked credential {} into PNG ({} chunks)",
        credential.id,
        chunks.len()
    );
    Ok(png::serialize(&chunks))
}

/// Re-extracts a baked credential from PNG bytes.
///
/// Returns `Ok(None)` when the image carries no `openbadges` chunk.
///
/// # Errors
/// [`BakeError`] when the PNG framing is malformed or the embedded JSON no
/// longer parses as a credential.
pub fn extract_png(bytes: &[u8]) -> Result<Option<OpenBadgeCredential>, BakeError> {
    for chunk in png::parse(bytes)? {
        if &chunk.chunk_type != b"iTXt" {
            continue;
        }
        if let Some(text) = itxt_text(&chunk.payload, BADGE_KEYWORD) {
            return Ok(Some(serde_json::from_slice(text)?));
        }
    }
    Ok(None)
}

/// Locates the first real `<svg` opening tag, rejecting lookalikes such as
/// `<svgfoo`.
fn find_svg_open_tag(markup: &str) -> Option<usize> {
    let mut search = 0;
    while let Some(relative) = markup[search..].find("<svg") {
        let start = search + relative;
        let after = start + 4;
        match markup[after..].chars().next() {
            Some(next) if next.is_whitespace() || next == '>' || next == '/' => {
                return Some(start)
            }
            Some(_) => search = after,
            None => return None,
        }
    }
    None
}

/// Bakes a signed credential into SVG markup.
///
/// Injects an `xmlns:openbadges` declaration and an `openbadges:verify`
/// attribute (base64 of the credential JSON) into the first `<svg>`
/// opening tag. This is a targeted text substitution: every other byte of
/// the markup, including child content and the closing tag, is preserved.
///
/// # Errors
/// [`BakeError::SvgRootNotFound`] when the markup has no `<svg>` opening
/// tag — a silent no-op would hand back an artifact with no credential in
/// it.
pub fn bake_svg(svg: &str, credential: &OpenBadgeCredential) -> Result<String, BakeError> {
    let json = serialization::to_json(credential)?;
    let encoded = base64::encode(json);

    let start = find_svg_open_tag(svg).ok_or(BakeError::SvgRootNotFound)?;
    let tag_close = svg[start..]
        .find('>')
        .map(|offset| start + offset)
        .ok_or(BakeError::SvgRootNotFound)?;
    // keep self-closing syntax intact
    let insert_at = if svg[..tag_close].ends_with('/') {
        tag_close - 1
    } else {
        tag_close
    };

    let mut out = String::with_capacity(svg.len() + encoded.len() + 80);
    out.push_str(&svg[..insert_at]);
    out.push_str(" xmlns:openbadges=\"");
    out.push_str(OPENBADGES_NAMESPACE);
    out.push_str("\" openbadges:verify=\"");
    out.push_str(&encoded);
    out.push('"');
    out.push_str(&svg[insert_at..]);
    Ok(out)
}

/// Re-extracts a baked credential from SVG markup.
///
/// Returns `Ok(None)` when no `openbadges:verify` attribute is present.
///
/// # Errors
/// [`BakeError`] when the attribute value is not base64 or does not decode
/// to a credential document.
pub fn extract_svg(svg: &str) -> Result<Option<OpenBadgeCredential>, BakeError> {
    const ATTRIBUTE: &str = "openbadges:verify=\"";
    let Some(position) = svg.find(ATTRIBUTE) else {
        return Ok(None);
    };
    let value_start = position + ATTRIBUTE.len();
    let Some(value_length) = svg[value_start..].find('"') else {
        return Ok(None);
    };
    let json = base64::decode(&svg[value_start..value_start + value_length])?;
    Ok(Some(serde_json::from_slice(&json)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::records::{BadgeRecord, OrganizationRecord, UserRecord};
    use crate::services::builder::build_credential;
    use crate::services::signer::sign_credential;
    use crate::utils::crypto::generate_keypair;
    use chrono::{TimeZone, Utc};

    fn signed_credential() -> OpenBadgeCredential {
        let unsigned = build_credential(
            "urn:uuid:bake-test",
            &BadgeRecord {
                id: "b1".into(),
                name: "Baker Test".into(),
                description: "desc".into(),
                earning_criteria: "criteria".into(),
                ..Default::default()
            },
            &UserRecord {
                email: Some("a@b.com".into()),
                ..Default::default()
            },
            &OrganizationRecord {
                id: "org1".into(),
                name: "Acme".into(),
                ..Default::default()
            },
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let keypair = generate_keypair();
        sign_credential(&unsigned, &keypair.private_key, "vm#key-1").unwrap()
    }

    fn sample_png_data_url() -> String {
        let bytes = png::serialize(&[
            Chunk::new(*b"IHDR", vec![0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0]),
            Chunk::new(*b"IDAT", vec![0xAB, 0xCD]),
            Chunk::new(*b"IEND", vec![]),
        ]);
        format!("data:image/png;base64,{}", base64::encode(bytes))
    }

    #[test]
    fn png_bake_inserts_before_image_data_and_preserves_chunks() {
        let credential = signed_credential();
        let baked = bake_png(&sample_png_data_url(), &credential).unwrap();
        let chunks = png::parse(&baked).unwrap();
        let tags: Vec<&[u8; 4]> = chunks.iter().map(|chunk| &chunk.chunk_type).collect();
        assert_eq!(tags, [b"IHDR", b"iTXt", b"IDAT", b"IEND"]);
        assert_eq!(
            chunks[0].payload,
            vec![0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0]
        );
        assert_eq!(chunks[2].payload, vec![0xAB, 0xCD]);
    }

    #[test]
    fn png_round_trip_yields_identical_json() {
        let credential = signed_credential();
        let baked = bake_png(&sample_png_data_url(), &credential).unwrap();
        let chunks = png::parse(&baked).unwrap();
        let itxt = chunks
            .iter()
            .find(|chunk| &chunk.chunk_type == b"iTXt")
            .unwrap();
        let embedded = itxt_text(&itxt.payload, BADGE_KEYWORD).unwrap();
        assert_eq!(
            embedded,
            serialization::to_json(&credential).unwrap().as_bytes()
        );

        let extracted = extract_png(&baked).unwrap().unwrap();
        assert_eq!(extracted, credential);
    }

    #[test]
    fn png_without_image_data_bakes_before_terminator() {
        let bytes = png::serialize(&[
            Chunk::new(*b"IHDR", vec![0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0]),
            Chunk::new(*b"IEND", vec![]),
        ]);
        let url = format!("data:image/png;base64,{}", base64::encode(bytes));
        let baked = bake_png(&url, &signed_credential()).unwrap();
        let chunks = png::parse(&baked).unwrap();
        let tags: Vec<&[u8; 4]> = chunks.iter().map(|chunk| &chunk.chunk_type).collect();
        assert_eq!(tags, [b"IHDR", b"iTXt", b"IEND"]);
    }

    #[test]
    fn non_data_url_is_rejected() {
        let result = bake_png("https://example.org/badge.png", &signed_credential());
        assert!(matches!(result, Err(BakeError::DataUrl)));
    }

    #[test]
    fn malformed_png_is_rejected() {
        let url = format!("data:image/png;base64,{}", base64::encode(b"not a png"));
        let result = bake_png(&url, &signed_credential());
        assert!(matches!(result, Err(BakeError::Png(_))));
    }

    #[test]
    fn unbaked_png_extracts_nothing() {
        let bytes = png::serialize(&[
            Chunk::new(*b"IHDR", vec![0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0]),
            Chunk::new(*b"IEND", vec![]),
        ]);
        assert!(extract_png(&bytes).unwrap().is_none());
    }

    #[test]
    fn svg_bake_injects_exactly_one_attribute_pair() {
        let credential = signed_credential();
        let baked = bake_svg(r#"<svg width="10" height="10"></svg>"#, &credential).unwrap();
        assert_eq!(baked.matches("xmlns:openbadges").count(), 1);
        assert_eq!(baked.matches("openbadges:verify").count(), 1);
        assert!(baked.starts_with(r#"<svg width="10" height="10" xmlns:openbadges="#));
        assert!(baked.ends_with("></svg>"));

        let extracted = extract_svg(&baked).unwrap().unwrap();
        assert_eq!(extracted, credential);
    }

    #[test]
    fn svg_self_closing_root_is_preserved() {
        let baked = bake_svg(r#"<svg width="10"/>"#, &signed_credential()).unwrap();
        assert!(baked.ends_with("\"/>"));
        assert!(extract_svg(&baked).unwrap().is_some());
    }

    #[test]
    fn svg_child_content_is_untouched() {
        let source = r#"<svg viewBox="0 0 10 10"><rect width="5"/></svg>"#;
        let baked = bake_svg(source, &signed_credential()).unwrap();
        assert!(baked.ends_with(r#"><rect width="5"/></svg>"#));
    }

    #[test]
    fn markup_without_svg_root_is_an_error() {
        let result = bake_svg("<div>not svg</div>", &signed_credential());
        assert!(matches!(result, Err(BakeError::SvgRootNotFound)));

        // a lookalike prefix is not a root element
        let result = bake_svg("<svgfoo></svgfoo>", &signed_credential());
        assert!(matches!(result, Err(BakeError::SvgRootNotFound)));
    }

    #[test]
    fn unbaked_svg_extracts_nothing() {
        assert!(extract_svg("<svg></svg>").unwrap().is_none());
    }

    #[test]
    fn undecodable_verify_attribute_reports_decode_error() {
        let svg = r#"<svg openbadges:verify="!!not base64!!"></svg>"#;
        let error = extract_svg(svg).unwrap_err();
        assert!(matches!(error, BakeError::ImageEncoding(_)));
        assert!(error.to_string().contains("embedded base64 payload"));
    }
}
