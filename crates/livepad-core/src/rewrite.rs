//! Import rewriting for served snippets.
//!
//! Snippets import the SDK by its bare package name. The browser cannot
//! resolve bare specifiers, so before compiling, each known specifier is
//! replaced by the versioned path the SDK bundles are hosted under:
//!
//! - `@vaguevoid/sdk/browser` → `/sdk/{SDK_VERSION}/browser.js`
//! - `@vaguevoid/sdk` → `/sdk/{SDK_VERSION}/sdk.js`
//!
//! This is plain substring replacement, not a parse. Each rule replaces only
//! its first occurrence, and a match inside a comment or a string literal is
//! rewritten just the same. Rules run in order, so a specifier that is a
//! prefix of another must come after it.

use crate::version::SDK_VERSION;

/// Bare specifier of the SDK's browser entry point.
pub const SDK_BROWSER_SPECIFIER: &str = "@vaguevoid/sdk/browser";

/// Bare specifier of the SDK core.
pub const SDK_CORE_SPECIFIER: &str = "@vaguevoid/sdk";

/// A single literal substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    /// Literal text to find.
    pub specifier: String,
    /// Text that replaces the first occurrence.
    pub replacement: String,
}

impl RewriteRule {
    /// Create a new rule.
    #[must_use]
    pub fn new(specifier: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            replacement: replacement.into(),
        }
    }

    fn apply(&self, source: &str) -> String {
        source.replacen(&self.specifier, &self.replacement, 1)
    }
}

/// Ordered table of import rewrite rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRewriter {
    rules: Vec<RewriteRule>,
}

impl Default for ImportRewriter {
    fn default() -> Self {
        Self::for_sdk_version(SDK_VERSION)
    }
}

impl ImportRewriter {
    /// Create a rewriter from an explicit rule table.
    #[must_use]
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    /// The SDK rule table for a given SDK version.
    #[must_use]
    pub fn for_sdk_version(version: &str) -> Self {
        Self::new(vec![
            RewriteRule::new(SDK_BROWSER_SPECIFIER, format!("/sdk/{version}/browser.js")),
            RewriteRule::new(SDK_CORE_SPECIFIER, format!("/sdk/{version}/sdk.js")),
        ])
    }

    /// The rules, in application order.
    #[must_use]
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Apply every rule in order.
    #[must_use]
    pub fn rewrite(&self, source: &str) -> String {
        self.rules
            .iter()
            .fold(source.to_string(), |acc, rule| rule.apply(&acc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> ImportRewriter {
        ImportRewriter::for_sdk_version("1.2.3")
    }

    #[test]
    fn test_rewrites_both_sdk_imports() {
        let source = r#"import { Game } from "@vaguevoid/sdk"
import { entrypoint } from "@vaguevoid/sdk/browser""#;

        let out = rewriter().rewrite(source);
        assert_eq!(
            out,
            r#"import { Game } from "/sdk/1.2.3/sdk.js"
import { entrypoint } from "/sdk/1.2.3/browser.js""#
        );
    }

    #[test]
    fn test_browser_rule_runs_before_core_rule() {
        let out = rewriter().rewrite(r#"import { entrypoint } from "@vaguevoid/sdk/browser""#);
        assert_eq!(out, r#"import { entrypoint } from "/sdk/1.2.3/browser.js""#);
        assert!(!out.contains("sdk.js/browser"));
    }

    #[test]
    fn test_only_first_occurrence_is_rewritten() {
        let source = r#"import { a } from "@vaguevoid/sdk"
import { b } from "@vaguevoid/sdk""#;

        let out = rewriter().rewrite(source);
        assert_eq!(out.matches("/sdk/1.2.3/sdk.js").count(), 1);
        assert_eq!(out.matches("\"@vaguevoid/sdk\"").count(), 1);
    }

    #[test]
    fn test_match_inside_comment_is_rewritten() {
        // Substring based: the comment is the first occurrence, so the real
        // import keeps its bare specifier.
        let source = r#"// uses @vaguevoid/sdk
import { Game } from "@vaguevoid/sdk""#;

        let out = rewriter().rewrite(source);
        assert!(out.starts_with("// uses /sdk/1.2.3/sdk.js"));
        assert!(out.ends_with(r#"from "@vaguevoid/sdk""#));
    }

    #[test]
    fn test_match_inside_string_literal_is_rewritten() {
        let out = rewriter().rewrite(r#"console.log("powered by @vaguevoid/sdk")"#);
        assert_eq!(out, r#"console.log("powered by /sdk/1.2.3/sdk.js")"#);
    }

    #[test]
    fn test_unrelated_source_is_untouched() {
        let source = r#"import { x } from "./ball""#;
        assert_eq!(rewriter().rewrite(source), source);
    }

    #[test]
    fn test_default_uses_build_sdk_version() {
        let rewriter = ImportRewriter::default();
        assert_eq!(rewriter.rules().len(), 2);
        assert_eq!(
            rewriter.rules()[1].replacement,
            format!("/sdk/{SDK_VERSION}/sdk.js")
        );
    }

    #[test]
    fn test_custom_rules() {
        let rewriter = ImportRewriter::new(vec![RewriteRule::new("lodash", "/vendor/lodash.js")]);
        assert_eq!(
            rewriter.rewrite(r#"import _ from "lodash""#),
            r#"import _ from "/vendor/lodash.js""#
        );
    }
}
