use crate::agents::declaration::{Declaration, DeclarationKind};
use crate::agents::report::{FileUpdate, Replacement};
use crate::agents::tree_walker::PlannedFile;
use crate::agents::version_extractor::VersionExtractor;
use crate::error::Result;
use crate::golang::ReleaseVersion;
use crate::utils::atomic_write::write_atomic;
use tracing::{debug, info};

/// Result of rewriting a file's content in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub replacements: Vec<Replacement>,
}

/// Substitutes the latest release into located declarations.
pub struct VersionRewriter;

impl VersionRewriter {
    /// Rewrite every declaration of `kind` in `content` to `latest`, each at
    /// the precision it was originally written with.
    pub fn rewrite(content: &str, kind: DeclarationKind, latest: &ReleaseVersion) -> Rewrite {
        let declarations = VersionExtractor::extract_all(content, kind);
        Self::rewrite_declarations(content, &declarations, latest)
    }

    /// `declarations` must come from `content`, in ascending span order.
    pub fn rewrite_declarations(
        content: &str,
        declarations: &[Declaration],
        latest: &ReleaseVersion,
    ) -> Rewrite {
        let mut updated = String::with_capacity(content.len());
        let mut replacements = Vec::with_capacity(declarations.len());
        let mut cursor = 0;

        for declaration in declarations {
            let new = latest.render(declaration.precision());

            updated.push_str(&content[cursor..declaration.span.start]);
            updated.push_str(&new);
            cursor = declaration.span.end;

            replacements.push(Replacement {
                line: declaration.line,
                old: declaration.raw.clone(),
                new,
            });
        }
        updated.push_str(&content[cursor..]);

        Rewrite {
            content: updated,
            replacements,
        }
    }

    /// Rewrite a planned file and commit it to disk.
    ///
    /// The file is written even when every declaration already matches.
    pub fn apply(planned: &PlannedFile, latest: &ReleaseVersion) -> Result<FileUpdate> {
        let rewrite = Self::rewrite_declarations(&planned.content, &planned.declarations, latest);

        for replacement in &rewrite.replacements {
            debug!(
                path = %planned.target.path.display(),
                line = replacement.line,
                old = %replacement.old,
                new = %replacement.new,
                "replacing {}",
                planned.target.kind
            );
        }

        write_atomic(&planned.target.path, &rewrite.content)?;
        info!(path = %planned.target.path.display(), "updated {}", planned.target.kind);

        Ok(FileUpdate {
            path: planned.target.path.clone(),
            kind: planned.target.kind,
            replacements: rewrite.replacements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::declaration::FileTarget;
    use rstest::rstest;
    use std::fs;
    use tempfile::tempdir;

    fn latest() -> ReleaseVersion {
        ReleaseVersion::new(1, 19, 3)
    }

    #[rstest]
    #[case::three_components("go 1.2.3", "go 1.19.3")]
    #[case::two_components("go 4.2", "go 1.19")]
    #[case::already_current("go 1.19.3", "go 1.19.3")]
    #[case::newer_is_still_replaced("go 2.0", "go 1.19")]
    #[case::trailing_comment("go 1.18 // keep\n", "go 1.19 // keep\n")]
    #[case::byte_order_mark("\u{feff}go 1.18\n", "\u{feff}go 1.19\n")]
    fn rewrites_module_directive(#[case] content: &str, #[case] expected: &str) {
        let rewrite = VersionRewriter::rewrite(content, DeclarationKind::ModuleDirective, &latest());
        assert_eq!(rewrite.content, expected);
    }

    #[test]
    fn leaves_rest_of_manifest_untouched() {
        let content = "module github.com/acme/widget\n\ngo 1.20\n\ntoolchain go1.20.4\n\nrequire (\n\tgithub.com/aws/aws-sdk-go v1.50.30\n)\n";
        let rewrite = VersionRewriter::rewrite(content, DeclarationKind::ModuleDirective, &latest());

        assert_eq!(
            rewrite.content,
            "module github.com/acme/widget\n\ngo 1.19\n\ntoolchain go1.20.4\n\nrequire (\n\tgithub.com/aws/aws-sdk-go v1.50.30\n)\n"
        );
        assert_eq!(
            rewrite.replacements,
            vec![Replacement {
                line: 3,
                old: "1.20".to_string(),
                new: "1.19".to_string(),
            }]
        );
    }

    #[rstest]
    #[case("FROM golang:4.2.0", "FROM golang:1.19.3")]
    #[case("FROM golang:4.2", "FROM golang:1.19")]
    #[case("FROM golang:1.18-alpine AS build", "FROM golang:1.19-alpine AS build")]
    #[case(
        "FROM --platform=$BUILDPLATFORM golang:1.18.1 AS build # pinned",
        "FROM --platform=$BUILDPLATFORM golang:1.19.3 AS build # pinned"
    )]
    fn rewrites_base_image(#[case] content: &str, #[case] expected: &str) {
        let rewrite = VersionRewriter::rewrite(content, DeclarationKind::BaseImage, &latest());
        assert_eq!(rewrite.content, expected);
    }

    #[test]
    fn preserves_non_matching_lines() {
        let content = "# syntax=docker/dockerfile:1\r\nFROM golang:1.20.5 AS build\r\nRUN go build -o /app .\r\n\r\nFROM gcr.io/distroless/static:nonroot\r\nFROM alpine:3.19\r\nCOPY --from=build /app /app\r\n";
        let rewrite = VersionRewriter::rewrite(content, DeclarationKind::BaseImage, &latest());

        assert_eq!(
            rewrite.content,
            content.replace("golang:1.20.5", "golang:1.19.3")
        );
        assert_eq!(rewrite.replacements.len(), 1);
    }

    #[test]
    fn rewrites_each_stage_at_its_own_precision() {
        let content = "FROM golang:1.20.1 AS build\nFROM golang:1.20 AS test\n";
        let rewrite = VersionRewriter::rewrite(content, DeclarationKind::BaseImage, &latest());
        assert_eq!(
            rewrite.content,
            "FROM golang:1.19.3 AS build\nFROM golang:1.19 AS test\n"
        );
    }

    #[rstest]
    #[case(DeclarationKind::ModuleDirective, "module x\n\ngo 1.2.3\n")]
    #[case(DeclarationKind::ModuleDirective, "module x\n\ngo 4.2\n")]
    #[case(DeclarationKind::BaseImage, "FROM golang:1.2 AS a\nFROM golang:1.2.3\n")]
    fn rewrite_is_idempotent(#[case] kind: DeclarationKind, #[case] content: &str) {
        let once = VersionRewriter::rewrite(content, kind, &latest());
        let twice = VersionRewriter::rewrite(&once.content, kind, &latest());
        assert_eq!(once.content, twice.content);
    }

    #[test]
    fn content_without_declarations_is_unchanged() {
        let content = "FROM alpine:3.19\nRUN true\n";
        let rewrite = VersionRewriter::rewrite(content, DeclarationKind::BaseImage, &latest());
        assert_eq!(rewrite.content, content);
        assert!(rewrite.replacements.is_empty());
    }

    #[test]
    fn apply_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("go.mod");
        let content = "module x\n\ngo 1.2.3\n".to_string();
        fs::write(&path, &content).unwrap();

        let planned = PlannedFile {
            target: FileTarget::new(&path, DeclarationKind::ModuleDirective),
            declarations: VersionExtractor::extract_all(&content, DeclarationKind::ModuleDirective),
            content,
        };

        let update = VersionRewriter::apply(&planned, &latest()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "module x\n\ngo 1.19.3\n");
        assert_eq!(update.path, path);
        assert_eq!(update.replacements.len(), 1);
    }
}
