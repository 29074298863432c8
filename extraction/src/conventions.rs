//! Conventions applied to every extracted description, whichever help format it came from.

use crate::description::{DType, TaskDescription};

/// Name of the parameter through which CASA tasks take their input measurement set.
pub const MEASUREMENT_SET_PARAMETER: &str = "vis";

/// Marks the measurement set parameter, if present, as a required measurement set reference.
pub fn apply(desc: &mut TaskDescription) {
    if let Some(param) = desc.get_mut(MEASUREMENT_SET_PARAMETER) {
        param.required = Some(true);
        param.dtype = Some(DType::MeasurementSet);
    }
}
