// Error handling
pub use crate::common::{Error, Result};

// Image types
pub use crate::image::{Image, ImageDesc};

// GPU
pub use crate::gpu::{CommandStream, Gpu, GpuTexture};

// Operations
pub use crate::ops::{
    Affine2, Composite, CompositeStage, Dilate, FilterMode, FilterStage, GaussianBlur,
    GpuBlurPipeline, GpuCompositePipeline, GpuDilatePipeline, GpuRescalePipeline,
    GpuThresholdPipeline, ImageStage, Rescale, StructuringElement, ThreadgroupGeometry,
    ThresholdBinary, Vec2, threadgroup_side,
};

// Configuration
pub use crate::params::PipelineParameters;

// Frame rendering
pub use crate::renderer::{
    FrameOutcome, FrameRenderer, FrameState, FrameStats, FrameTarget, OffscreenTarget,
    PipelineResources, SkipReason,
};
