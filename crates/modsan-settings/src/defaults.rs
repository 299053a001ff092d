use crate::resolve::{EffectiveConfig, ModuleSource};
use modsan_domain::ExclusionSet;
use modsan_types::{Coordinate, ids};

/// Built-in settings used when nothing is configured.
pub fn effective_defaults() -> EffectiveConfig {
    EffectiveConfig {
        publication: ids::DEFAULT_PUBLICATION.to_string(),
        build_dir: ids::DEFAULT_BUILD_DIR.to_string(),
        indent: ids::DEFAULT_INDENT,
        exclusions: ExclusionSet::single(Coordinate::aggregator()),
        modules: ModuleSource::Discover,
    }
}
