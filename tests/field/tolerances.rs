#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleLevel {
    Pr,
    Nightly,
}

impl SampleLevel {
    pub fn from_env() -> Self {
        match std::env::var("COLORSPACE_VIZ_SAMPLE_LEVEL")
            .unwrap_or_else(|_| "pr".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "nightly" => Self::Nightly,
            _ => Self::Pr,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldTolerances {
    // Componentwise error allowed on CPU round trips.
    pub round_trip_abs: f32,
    // Disagreement allowed between the production conversions and the
    // branch-based reference forms.
    pub reference_abs: f32,
    // Per-channel byte error allowed between CPU and GPU framebuffers.
    pub cpu_gpu_channel_abs: u8,
    // Fraction of pixels whose palette index may disagree between CPU and
    // GPU; classification flips on exact region boundaries.
    pub cpu_gpu_index_fraction: f32,
    // Delta-E agreement between CPU and GPU formulations at 8-bit inputs.
    pub delta_e_abs: f32,
    // Samples per axis of the color grids.
    pub grid_samples: usize,
}

pub fn sample_level() -> SampleLevel {
    SampleLevel::from_env()
}

pub fn current_tolerances() -> FieldTolerances {
    match sample_level() {
        SampleLevel::Pr => FieldTolerances {
            round_trip_abs: 1e-6,
            reference_abs: 1e-4,
            cpu_gpu_channel_abs: 2,
            cpu_gpu_index_fraction: 0.01,
            delta_e_abs: 1.0,
            grid_samples: 12,
        },
        SampleLevel::Nightly => FieldTolerances {
            round_trip_abs: 1e-6,
            reference_abs: 5e-5,
            cpu_gpu_channel_abs: 2,
            cpu_gpu_index_fraction: 0.005,
            delta_e_abs: 1.0,
            grid_samples: 24,
        },
    }
}
