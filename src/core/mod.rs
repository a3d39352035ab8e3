// Core pipeline exports
pub mod encoder;
pub mod features;
pub mod format;
pub mod model;
pub mod pipeline;
pub mod scaler;
pub mod schema;

pub use encoder::{CategoricalEncoder, EncodeError, EncoderSpecError, OneHotEncoder, OneHotEncoderSpec, UnknownCategoryPolicy};
pub use features::{derive_features, is_good_location, is_luxury_house};
pub use format::format_currency;
pub use model::{LinearModel, ModelError, ModelSpecError, Regressor};
pub use pipeline::{PipelineError, Predictor};
pub use scaler::{FeatureScaler, MinMaxScaler, ScaleError, ScalerSpec, ScalerSpecError, StandardScaler};
pub use schema::{FeatureSchema, SchemaError};
