// tracksmith-core/src/validation/images.rs
//
// Resolution and shape checks for the cover and art sources.

use super::report::{ValidationIssue, ValidationReport};
use crate::config::CoreConfig;
use crate::images::{ImageRole, load_image, needs_upscale};

use std::path::Path;

/// Decodes the image at `path` and records any problem with it.
///
/// The whole image is decoded, not just the header, so a truncated file
/// is caught here rather than after output directories exist.
pub fn check_image(role: ImageRole, path: &Path, config: &CoreConfig, report: &mut ValidationReport) {
    let img = match load_image(path) {
        Ok(img) => img,
        Err(e) => {
            report.add_issue(ValidationIssue::ImageUnreadable {
                role,
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            return;
        }
    };
    let (width, height) = (img.width(), img.height());
    log::debug!("{} image {}: {}x{}", role, path.display(), width, height);

    let min = config.min_resolution;
    if width < min || height < min {
        report.add_issue(ValidationIssue::ResolutionTooLow {
            role,
            width,
            height,
            min,
        });
    }

    if role == ImageRole::Art && width != height {
        report.add_issue(ValidationIssue::ArtNotSquare { width, height });
    }

    let targets: Vec<u32> = match role {
        ImageRole::Cover => config
            .images
            .densities
            .iter()
            .map(|d| d.max_dimension)
            .collect(),
        ImageRole::Art => vec![config.images.art_target],
    };
    for target in targets.into_iter().filter(|t| needs_upscale(width, height, *t)) {
        let action = if config.images.allow_upscale {
            "will be upscaled"
        } else {
            "will keep its source size"
        };
        report.add_warning(
            format!("The {role} image ({width}x{height}) is smaller than the {target}px target and {action}"),
            "Images",
        );
    }
}
