use derive_more::Deref;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// A pipeline stage a Slang entry point can be declared for.
///
/// Variants are listed in detection order, which is also the order
/// [`strum::IntoEnumIterator::iter`] yields them in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum ShaderStage {
    Vertex,
    Fragment,
    RayGeneration,
    Miss,
    ClosestHit,
    Callable,
    Intersection,
    AnyHit,
    Compute,
    Amplification,
    Mesh,
    Geometry,
    Hull,
    Domain,
}

impl ShaderStage {
    /// Name passed to `slangc -stage`, e.g. `raygeneration`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Token inserted before `.spv` in the output file name.
    pub fn extension(self) -> &'static str {
        match self {
            ShaderStage::Vertex => ".vert",
            ShaderStage::Fragment => ".frag",
            ShaderStage::RayGeneration => ".rgen",
            ShaderStage::Miss => ".rmiss",
            ShaderStage::ClosestHit => ".rchit",
            ShaderStage::Callable => ".rcall",
            ShaderStage::Intersection => ".rint",
            ShaderStage::AnyHit => ".rahit",
            ShaderStage::Compute => ".comp",
            ShaderStage::Amplification => ".task",
            ShaderStage::Mesh => ".mesh",
            ShaderStage::Geometry => ".geom",
            ShaderStage::Hull => ".tesc",
            ShaderStage::Domain => ".tese",
        }
    }

    pub fn entry_point(self) -> String {
        format!("{}Main", self.name())
    }

    /// The attribute that declares an entry point for this stage, e.g.
    /// `[shader("vertex")]`.
    pub fn marker(self) -> String {
        format!("[shader(\"{}\")]", self.name())
    }
}

/// Stages declared by one source file, always in [`ShaderStage`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct ShaderStageSet(Vec<ShaderStage>);

impl FromIterator<ShaderStage> for ShaderStageSet {
    fn from_iter<I: IntoIterator<Item = ShaderStage>>(iter: I) -> Self {
        let mut stages: Vec<_> = iter.into_iter().collect();
        stages.sort_by_key(|&stage| stage as usize);
        stages.dedup();
        Self(stages)
    }
}

impl IntoIterator for ShaderStageSet {
    type Item = ShaderStage;
    type IntoIter = std::vec::IntoIter<ShaderStage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ShaderStageSet {
    type Item = &'a ShaderStage;
    type IntoIter = std::slice::Iter<'a, ShaderStage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
