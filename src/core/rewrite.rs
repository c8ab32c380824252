use crate::domain::ports::Rewrite;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Replaces every match of a signature pattern with a replacement template.
///
/// The template follows `regex` replacement syntax, so `${1}` refers to a
/// capture group.
#[derive(Debug, Clone)]
pub struct SignatureRewrite {
    pattern: Regex,
    replacement: String,
}

impl SignatureRewrite {
    pub fn new(pattern: Regex, replacement: impl Into<String>) -> Self {
        Self {
            pattern,
            replacement: replacement.into(),
        }
    }
}

impl Rewrite for SignatureRewrite {
    fn name(&self) -> &str {
        "signature"
    }

    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(content, self.replacement.as_str())
    }
}

/// Unwraps the deferred params object inside each exported handler.
///
/// Handler spans are found by `span` alone. The default span pattern stops at
/// the first `}` in column zero, so a handler holding a zero-indented brace
/// in a nested literal is cut short; spans are never brace-balanced.
#[derive(Debug, Clone)]
pub struct HandlerRewrite {
    pub span: Regex,
    pub accessor: String,
    pub awaited_marker: String,
    pub anchor: Regex,
    pub injection: String,
    pub replacement: String,
}

impl HandlerRewrite {
    /// Rewrites one handler span, or returns it unchanged when it does not
    /// read the accessor or has already been unwrapped.
    pub fn rewrite_span(&self, span: &str) -> String {
        if !span.contains(&self.accessor) || span.contains(&self.awaited_marker) {
            return span.to_string();
        }

        let injected = match self.anchor.find(span) {
            Some(m) => {
                let injection = match_line_endings(&self.injection, span);
                let mut out = String::with_capacity(span.len() + injection.len());
                out.push_str(&span[..m.end()]);
                out.push_str(&injection);
                out.push_str(&span[m.end()..]);
                out
            }
            None => {
                tracing::warn!(
                    "Handler uses '{}' but has no '{}' block; rewriting references only",
                    self.accessor,
                    self.anchor.as_str()
                );
                span.to_string()
            }
        };

        injected.replace(&self.accessor, &self.replacement)
    }
}

/// Gives `text` the CRLF line endings of `span` when `span` uses them.
fn match_line_endings<'a>(text: &'a str, span: &str) -> Cow<'a, str> {
    if span.contains("\r\n") && text.contains('\n') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\n', "\r\n"))
    } else {
        Cow::Borrowed(text)
    }
}

impl Rewrite for HandlerRewrite {
    fn name(&self) -> &str {
        "handler"
    }

    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        let rewritten = self
            .span
            .replace_all(content, |caps: &Captures| self.rewrite_span(&caps[0]));

        // replace_all allocates whenever a span matched, even if no span changed
        match rewritten {
            Cow::Owned(text) if text == content => Cow::Borrowed(content),
            other => other,
        }
    }
}

/// Runs rewrites in order, each over the previous one's output.
pub fn apply_all(rewrites: &[Box<dyn Rewrite>], original: &str) -> String {
    let mut working = original.to_string();
    for rewrite in rewrites {
        let next = match rewrite.apply(&working) {
            Cow::Owned(next) => next,
            Cow::Borrowed(_) => continue,
        };
        tracing::debug!("{} pass changed the text", rewrite.name());
        working = next;
    }
    working
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::PatchProfile;
    use pretty_assertions::assert_eq;

    fn handler() -> HandlerRewrite {
        PatchProfile::default()
            .handler
            .build()
            .expect("default handler patterns compile")
    }

    #[test]
    fn test_signature_rewrite_exact_shape_only() {
        let rewrite = PatchProfile::default()
            .signature
            .build()
            .expect("default signature pattern compiles");

        let input = "(req: Request, { params }: { params: { id: string } })";
        assert_eq!(
            rewrite.apply(input),
            "(req: Request, { params }: { params: Promise<{ id: string }> })"
        );

        let other_shape = "(req: Request, { params }: { params: { slug: string } })";
        assert!(matches!(rewrite.apply(other_shape), Cow::Borrowed(_)));
    }

    #[test]
    fn test_rewrite_span_injects_after_first_try_only() {
        let span = "export async function GET(req, ctx) {\n    try {\n        return find(params.id)\n    } catch (e) {}\n    try {\n        log(params.id)\n    } catch (e) {}\n}";
        let out = handler().rewrite_span(span);

        assert_eq!(out.matches("const { id } = await params").count(), 1);
        assert!(!out.contains("params.id"));
        assert!(out.contains("    try {\n        const { id } = await params\n        return find(id)"));
        assert!(out.contains("log(id)"));
    }

    #[test]
    fn test_injection_follows_crlf_span() {
        let span = "export async function GET(req, ctx) {\r\n    try {\r\n        return find(params.id)\r\n    } catch (e) {}\r\n}";
        let out = handler().rewrite_span(span);

        assert!(out.contains("try {\r\n        const { id } = await params\r\n        return find(id)\r\n"));
        assert_eq!(out.matches('\n').count(), out.matches("\r\n").count());
    }

    #[test]
    fn test_match_line_endings_keeps_lf_spans() {
        assert!(matches!(match_line_endings("a\nb", "x\ny"), Cow::Borrowed("a\nb")));
        assert_eq!(match_line_endings("a\r\nb\nc", "x\r\ny"), "a\r\nb\r\nc");
    }

    #[test]
    fn test_rewrite_span_respects_awaited_marker() {
        let span = "export async function GET(req, ctx) {\n    try {\n        const { id } = await params\n        audit(params.id)\n    } catch (e) {}\n}";
        assert_eq!(handler().rewrite_span(span), span);
    }

    #[test]
    fn test_rewrite_span_without_accessor_untouched() {
        let span = "export async function GET() {\n    try {\n        return list()\n    } catch (e) {}\n}";
        assert_eq!(handler().rewrite_span(span), span);
    }

    #[test]
    fn test_rewrite_span_without_try_still_replaces_references() {
        let span = "export async function DELETE(req, ctx) {\n    return remove(params.id)\n}";
        let out = handler().rewrite_span(span);
        assert_eq!(out, "export async function DELETE(req, ctx) {\n    return remove(id)\n}");
    }

    #[test]
    fn test_handler_spans_end_at_first_column_zero_brace() {
        let content = "export async function PUT(req, ctx) {\n    try {\n        const key = params.id\n        const body = {\n}\n        save(params.id, body)\n    } catch (e) {}\n}\n";
        let out = handler().apply(content);

        // The span ends at the zero-indented brace of the object literal, so the
        // second reference is outside any handler span.
        assert!(out.contains("const { id } = await params"));
        assert!(out.contains("const key = id\n"));
        assert!(out.contains("save(params.id, body)"));
    }

    #[test]
    fn test_handler_apply_borrows_when_nothing_changes() {
        let content = "export async function GET() {\n    try {\n        return list()\n    } catch (e) {}\n}\n";
        assert!(matches!(handler().apply(content), Cow::Borrowed(_)));
    }

    #[test]
    fn test_non_exported_functions_are_ignored() {
        let content = "async function helper(params) {\n    try {\n        return params.id\n    } catch (e) {}\n}\n";
        assert_eq!(handler().apply(content), content);
    }
}
