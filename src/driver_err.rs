//! Human-readable names for native driver error codes.
//!
//! The GXC driver reports failures as raw `u32` codes. This table maps the
//! closed set of defined codes to their names for log output. Lookup is pure
//! and total: anything outside the defined set comes back as a generic
//! unknown-error string rather than a failure.

/// Error codes returned by the GXC driver.
pub mod codes {
    pub const UNINITIALIZED: u32 = 0x8044_0000;
    pub const ALREADY_INITIALIZED: u32 = 0x8044_0001;
    pub const OUT_OF_MEMORY: u32 = 0x8044_0002;
    pub const INVALID_VALUE: u32 = 0x8044_0003;
    pub const INVALID_POINTER: u32 = 0x8044_0004;
    pub const INVALID_ALIGNMENT: u32 = 0x8044_0005;
    pub const NOT_WITHIN_SCENE: u32 = 0x8044_0006;
    pub const WITHIN_SCENE: u32 = 0x8044_0007;
    pub const NULL_PROGRAM: u32 = 0x8044_0008;
    pub const UNSUPPORTED: u32 = 0x8044_0009;
    pub const PATCHER_INTERNAL: u32 = 0x8044_000A;
    pub const RESERVE_FAILED: u32 = 0x8044_000B;
    pub const PROGRAM_IN_USE: u32 = 0x8044_000C;
    pub const INVALID_INDEX_COUNT: u32 = 0x8044_000D;
    pub const INVALID_POLYGON_MODE: u32 = 0x8044_000E;
    pub const INVALID_SAMPLER_RESULT_TYPE_PRECISION: u32 = 0x8044_000F;
    pub const INVALID_SAMPLER_RESULT_TYPE_COMPONENT_COUNT: u32 = 0x8044_0010;
    pub const UNIFORM_BUFFER_NOT_RESERVED: u32 = 0x8044_0011;
    pub const INVALID_AUXILIARY_SURFACE: u32 = 0x8044_0012;
    pub const INVALID_PRECOMPUTED_DRAW: u32 = 0x8044_0013;
    pub const INVALID_PRECOMPUTED_VERTEX_STATE: u32 = 0x8044_0014;
    pub const INVALID_PRECOMPUTED_FRAGMENT_STATE: u32 = 0x8044_0015;
    pub const DRIVER_INTERNAL: u32 = 0x8044_0016;
    pub const INVALID_TEXTURE: u32 = 0x8044_0017;
    pub const INVALID_TEXTURE_DATA_POINTER: u32 = 0x8044_0018;
    pub const INVALID_TEXTURE_PALETTE_POINTER: u32 = 0x8044_0019;
    pub const OUT_OF_RENDER_TARGETS: u32 = 0x8044_001A;
}

/// Fallback for codes outside the defined set.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// Name of a driver error code, or [`UNKNOWN_ERROR`] for undefined codes.
pub fn describe(code: u32) -> &'static str {
    match code {
        codes::UNINITIALIZED => "GXC_ERROR_UNINITIALIZED",
        codes::ALREADY_INITIALIZED => "GXC_ERROR_ALREADY_INITIALIZED",
        codes::OUT_OF_MEMORY => "GXC_ERROR_OUT_OF_MEMORY",
        codes::INVALID_VALUE => "GXC_ERROR_INVALID_VALUE",
        codes::INVALID_POINTER => "GXC_ERROR_INVALID_POINTER",
        codes::INVALID_ALIGNMENT => "GXC_ERROR_INVALID_ALIGNMENT",
        codes::NOT_WITHIN_SCENE => "GXC_ERROR_NOT_WITHIN_SCENE",
        codes::WITHIN_SCENE => "GXC_ERROR_WITHIN_SCENE",
        codes::NULL_PROGRAM => "GXC_ERROR_NULL_PROGRAM",
        codes::UNSUPPORTED => "GXC_ERROR_UNSUPPORTED",
        codes::PATCHER_INTERNAL => "GXC_ERROR_PATCHER_INTERNAL",
        codes::RESERVE_FAILED => "GXC_ERROR_RESERVE_FAILED",
        codes::PROGRAM_IN_USE => "GXC_ERROR_PROGRAM_IN_USE",
        codes::INVALID_INDEX_COUNT => "GXC_ERROR_INVALID_INDEX_COUNT",
        codes::INVALID_POLYGON_MODE => "GXC_ERROR_INVALID_POLYGON_MODE",
        codes::INVALID_SAMPLER_RESULT_TYPE_PRECISION => {
            "GXC_ERROR_INVALID_SAMPLER_RESULT_TYPE_PRECISION"
        }
        codes::INVALID_SAMPLER_RESULT_TYPE_COMPONENT_COUNT => {
            "GXC_ERROR_INVALID_SAMPLER_RESULT_TYPE_COMPONENT_COUNT"
        }
        codes::UNIFORM_BUFFER_NOT_RESERVED => "GXC_ERROR_UNIFORM_BUFFER_NOT_RESERVED",
        codes::INVALID_AUXILIARY_SURFACE => "GXC_ERROR_INVALID_AUXILIARY_SURFACE",
        codes::INVALID_PRECOMPUTED_DRAW => "GXC_ERROR_INVALID_PRECOMPUTED_DRAW",
        codes::INVALID_PRECOMPUTED_VERTEX_STATE => "GXC_ERROR_INVALID_PRECOMPUTED_VERTEX_STATE",
        codes::INVALID_PRECOMPUTED_FRAGMENT_STATE => "GXC_ERROR_INVALID_PRECOMPUTED_FRAGMENT_STATE",
        codes::DRIVER_INTERNAL => "GXC_ERROR_DRIVER_INTERNAL",
        codes::INVALID_TEXTURE => "GXC_ERROR_INVALID_TEXTURE",
        codes::INVALID_TEXTURE_DATA_POINTER => "GXC_ERROR_INVALID_TEXTURE_DATA_POINTER",
        codes::INVALID_TEXTURE_PALETTE_POINTER => "GXC_ERROR_INVALID_TEXTURE_PALETTE_POINTER",
        codes::OUT_OF_RENDER_TARGETS => "GXC_ERROR_OUT_OF_RENDER_TARGETS",
        _ => UNKNOWN_ERROR,
    }
}
