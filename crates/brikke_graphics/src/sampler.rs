use serde::Deserialize;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Filter {
    #[default]
    Linear,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum MinFilter {
    Origin(Filter),
    Mipmap { mipmap: Filter, texel: Filter },
}

impl MinFilter {
    /// True when minification samples mipmap levels.
    pub fn is_mip_map(&self) -> bool {
        matches!(self, Self::Mipmap { .. })
    }
}

impl Default for MinFilter {
    fn default() -> Self {
        Self::Mipmap {
            mipmap: Filter::Linear,
            texel: Filter::Nearest,
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum WrapFunction {
    Clamp,
    #[default]
    Repeat,
    MirrorClamp,
    MirrorRepeat,
}

/// Filtering and wrapping state a texture page expects from its sampler.
/// Wrap is per-axis because atlas pages are routinely clamped on one axis
/// only when packed into a larger texture.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplerState {
    pub u_wrap: WrapFunction,
    pub v_wrap: WrapFunction,
    pub min_filter: MinFilter,
    pub mag_filter: Filter,
}

impl SamplerState {
    pub fn linear() -> Self {
        SamplerState {
            u_wrap: WrapFunction::Clamp,
            v_wrap: WrapFunction::Clamp,
            min_filter: MinFilter::Origin(Filter::Linear),
            mag_filter: Filter::Linear,
        }
    }

    pub fn nearest() -> Self {
        SamplerState {
            u_wrap: WrapFunction::Clamp,
            v_wrap: WrapFunction::Clamp,
            min_filter: MinFilter::Origin(Filter::Nearest),
            mag_filter: Filter::Nearest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mip_map_detection() {
        assert!(!SamplerState::nearest().min_filter.is_mip_map());
        assert!(!SamplerState::linear().min_filter.is_mip_map());
        assert!(MinFilter::default().is_mip_map());
    }
}
