//! Tree based engine pairing each emitted asset with at most one element.

use tracing::debug;

use crate::asset_paths::{HashNaming, UrlDecorator, base_file_name};
use crate::document::Candidate;
use crate::models::{AssetEntry, AssetKind, RewrittenAsset};

/// Claim candidates for `assets` in manifest order and rewrite their URL attribute.
///
/// Each asset takes the first remaining candidate whose referenced filename equals the
/// asset's origin name, and is consumed whether or not it found one. Matching is greedy:
/// a later asset never steals a candidate from an earlier one. Assets without a matching
/// element are dropped and no elements are ever inserted.
pub fn match_candidates(
    kind: AssetKind,
    candidates: Vec<Candidate>,
    assets: &[AssetEntry],
    naming: HashNaming<'_>,
    decorator: &UrlDecorator,
) -> Vec<RewrittenAsset> {
    let attribute = kind.url_attribute();
    let mut pool = candidates;
    let mut rewritten = Vec::new();

    for asset in assets {
        if pool.is_empty() {
            break;
        }

        let Some(origin) = naming.origin_name(&asset.path) else {
            continue;
        };

        let claimed = pool.iter().position(|candidate| {
            candidate
                .attribute(attribute)
                .is_some_and(|value| base_file_name(&value) == origin)
        });
        let Some(index) = claimed else {
            debug!(asset = %asset.path, %origin, "no element references asset, skipping");
            continue;
        };

        let candidate = pool.remove(index);
        let url = decorator.decorate(&asset.path);
        if let Some(original) = candidate.set_attribute(attribute, &url) {
            debug!(
                asset = %asset.path,
                location = ?candidate.location,
                position = candidate.position,
                %original,
                "rewrote {attribute}"
            );
            rewritten.push(RewrittenAsset {
                location: candidate.location,
                position: candidate.position,
                original,
                rewritten: url,
            });
        }
    }

    for candidate in &pool {
        debug!(
            location = ?candidate.location,
            position = candidate.position,
            value = ?candidate.attribute(attribute),
            "element left unchanged"
        );
    }

    rewritten
}
