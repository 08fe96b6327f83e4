mod blur;
mod composite;
mod dilate;
pub(crate) mod kernel;
mod rescale;
mod stage;
mod threadgroup;
mod threshold;

pub use blur::{GaussianBlur, GpuBlurPipeline};
pub use composite::{Composite, GpuCompositePipeline};
pub use dilate::{Dilate, GpuDilatePipeline, StructuringElement};
pub use rescale::{Affine2, FilterMode, GpuRescalePipeline, Rescale, Vec2};
pub use stage::{CompositeStage, FilterStage, ImageStage};
pub use threadgroup::{ThreadgroupGeometry, threadgroup_side};
pub use threshold::{GpuThresholdPipeline, ThresholdBinary};
