use serde::{Deserialize, Serialize};

/// Chain-based technique a pattern is reported as (ordered by difficulty)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Technique {
    // Single-digit
    XChain,
    GroupedXChain,
    ContinuousNiceLoop,

    // Six-node wings
    WWing,
    MWing,
    SplitWing,
    LocalWing,
    HybridWing,
    AlsWWing,

    // General chains
    XyChain,
    DiscontinuousNiceLoop,
    AIC,
    GroupedAIC,
    GroupedContinuousNiceLoop,

    // Multi-branch
    CellForcingChains,
    RegionForcingChains,
    BlossomLoop,
}

impl std::fmt::Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Technique::XChain => write!(f, "X-Chain"),
            Technique::GroupedXChain => write!(f, "Grouped X-Chain"),
            Technique::ContinuousNiceLoop => write!(f, "Continuous Nice Loop"),
            Technique::WWing => write!(f, "W-Wing"),
            Technique::MWing => write!(f, "M-Wing"),
            Technique::SplitWing => write!(f, "S-Wing"),
            Technique::LocalWing => write!(f, "L-Wing"),
            Technique::HybridWing => write!(f, "H-Wing"),
            Technique::AlsWWing => write!(f, "ALS-W-Wing"),
            Technique::XyChain => write!(f, "XY-Chain"),
            Technique::DiscontinuousNiceLoop => write!(f, "Discontinuous Nice Loop"),
            Technique::AIC => write!(f, "AIC"),
            Technique::GroupedAIC => write!(f, "Grouped AIC"),
            Technique::GroupedContinuousNiceLoop => write!(f, "Grouped Continuous Nice Loop"),
            Technique::CellForcingChains => write!(f, "Cell Forcing Chains"),
            Technique::RegionForcingChains => write!(f, "Region Forcing Chains"),
            Technique::BlossomLoop => write!(f, "Blossom Loop"),
        }
    }
}
