//! Encodes the shareable quiz identifier into a page address.
//!
//! Every function here is pure: it takes the current address and returns the
//! rewritten one. Malformed addresses never raise; they yield `None`.
//! Path-only addresses (`/quiz?lang=en`) are accepted and stay path-only.

use url::{Position, Url, form_urlencoded};

use crate::model::QuizId;

/// Query parameter that carries the quiz identifier.
pub const QUIZ_ID_PARAM: &str = "quiz_id";

const RELATIVE_BASE: &str = "http://relative.invalid/";

struct Location {
    url: Url,
    relative: bool,
}

impl Location {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match Url::parse(raw) {
            Ok(url) if !url.cannot_be_a_base() => Some(Self {
                url,
                relative: false,
            }),
            Ok(_) => None,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = Url::parse(RELATIVE_BASE).ok()?;
                let url = base.join(raw).ok()?;
                Some(Self {
                    url,
                    relative: true,
                })
            }
            Err(_) => None,
        }
    }

    fn render(&self) -> String {
        if self.relative {
            self.url[Position::BeforePath..].to_string()
        } else {
            self.url.to_string()
        }
    }

    /// Replace (or drop, with `None`) the quiz id parameter. Other segments
    /// keep their raw text and position; only the quiz id pair is re-encoded.
    fn rewrite(&mut self, value: Option<&str>) {
        let replacement = value.map(|value| {
            let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
            format!("{QUIZ_ID_PARAM}={encoded}")
        });
        let mut segments: Vec<String> = Vec::new();
        let mut placed = false;
        for segment in self.url.query().unwrap_or_default().split('&') {
            if !is_quiz_id_segment(segment) {
                if !segment.is_empty() {
                    segments.push(segment.to_owned());
                }
                continue;
            }
            if let (Some(pair), false) = (&replacement, placed) {
                segments.push(pair.clone());
                placed = true;
            }
        }
        if let (Some(pair), false) = (replacement, placed) {
            segments.push(pair);
        }

        if segments.is_empty() {
            self.url.set_query(None);
        } else {
            self.url.set_query(Some(&segments.join("&")));
        }
    }
}

fn is_quiz_id_segment(segment: &str) -> bool {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .is_some_and(|(key, _)| key == QUIZ_ID_PARAM)
}

/// Return `location` with the quiz id parameter set to `quiz_id`.
#[must_use]
pub fn encode(location: &str, quiz_id: &QuizId) -> Option<String> {
    let mut parsed = Location::parse(location)?;
    parsed.rewrite(Some(quiz_id.as_str()));
    Some(parsed.render())
}

/// Read the quiz id parameter; absent or blank values yield `None`.
#[must_use]
pub fn decode(location: &str) -> Option<QuizId> {
    let parsed = Location::parse(location)?;
    let value = parsed
        .url
        .query_pairs()
        .find(|(key, _)| key == QUIZ_ID_PARAM)
        .map(|(_, value)| value.into_owned())?;
    QuizId::new(value).ok()
}

/// Return `location` without the quiz id parameter.
#[must_use]
pub fn clear(location: &str) -> Option<String> {
    let mut parsed = Location::parse(location)?;
    parsed.rewrite(None);
    Some(parsed.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(raw: &str) -> QuizId {
        QuizId::new(raw).unwrap()
    }

    #[test]
    fn roundtrip_preserves_other_params() {
        let location = "https://quiz.example/app/?lang=en&theme=dark#top";
        let encoded = encode(location, &id("abc123")).unwrap();
        assert_eq!(
            encoded,
            "https://quiz.example/app/?lang=en&theme=dark&quiz_id=abc123#top"
        );
        assert_eq!(decode(&encoded), Some(id("abc123")));
    }

    #[test]
    fn encode_replaces_existing_value_in_place() {
        let encoded = encode("http://localhost/?a=1&quiz_id=old&b=2&quiz_id=dup", &id("new"))
            .unwrap();
        assert_eq!(encoded, "http://localhost/?a=1&quiz_id=new&b=2");
    }

    #[test]
    fn decode_missing_or_blank_is_none() {
        assert_eq!(decode("http://localhost/"), None);
        assert_eq!(decode("http://localhost/?quiz_id="), None);
        assert_eq!(decode("http://localhost/?quiz_id=%20%20"), None);
        assert_eq!(decode("http://localhost/?other=1"), None);
    }

    #[test]
    fn clear_drops_only_the_quiz_param() {
        assert_eq!(
            clear("http://localhost/page?quiz_id=abc&lang=en").as_deref(),
            Some("http://localhost/page?lang=en")
        );
        assert_eq!(
            clear("http://localhost/page?quiz_id=abc").as_deref(),
            Some("http://localhost/page")
        );
    }

    #[test]
    fn path_only_locations_stay_relative() {
        let encoded = encode("/quiz?lang=en", &id("q1")).unwrap();
        assert_eq!(encoded, "/quiz?lang=en&quiz_id=q1");
        assert_eq!(decode("/quiz?quiz_id=q1"), Some(id("q1")));
        assert_eq!(clear("/quiz?quiz_id=q1").as_deref(), Some("/quiz"));
    }

    #[test]
    fn malformed_locations_fail_closed() {
        for bad in ["", "   ", "http://[::1", "mailto:someone@example.com"] {
            assert_eq!(decode(bad), None, "decode {bad:?}");
            assert_eq!(encode(bad, &id("x")), None, "encode {bad:?}");
            assert_eq!(clear(bad), None, "clear {bad:?}");
        }
    }

    #[test]
    fn other_params_keep_their_raw_text() {
        let location = "http://localhost/?flag&q=a%20b&x=1+2";
        let encoded = encode(location, &id("abc")).unwrap();
        assert_eq!(encoded, "http://localhost/?flag&q=a%20b&x=1+2&quiz_id=abc");
        assert_eq!(
            clear(&encoded).as_deref(),
            Some("http://localhost/?flag&q=a%20b&x=1+2")
        );
        assert_eq!(
            encode("/p?quiz_id=old&flag", &id("new")).as_deref(),
            Some("/p?quiz_id=new&flag")
        );
    }

    #[test]
    fn reserved_characters_roundtrip() {
        let tricky = id("a b&c=d");
        let encoded = encode("http://localhost/", &tricky).unwrap();
        assert_eq!(decode(&encoded), Some(tricky));
    }
}
