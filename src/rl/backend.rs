//! Backend type aliases and device management
//!
//! - **TrainingBackend**: Autodiff-enabled NdArray backend (CPU)
//! - **InferenceBackend**: Plain NdArray backend (CPU)
//!
//! The Q-network is tiny, so the CPU backend is all the trainer needs.

use burn::backend::{
    ndarray::{NdArray, NdArrayDevice},
    Autodiff,
};

/// Backend type for training (with autodiff)
pub type TrainingBackend = Autodiff<NdArray<f32>>;

/// Backend type for inference (without autodiff)
pub type InferenceBackend = NdArray<f32>;

/// Get the default device for computation
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::Observation;
    use burn::tensor::{Tensor, TensorData};

    #[test]
    fn test_observation_tensor_on_both_backends() {
        let device = default_device();
        let floats = Observation([1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0]).to_floats();

        let inference: Tensor<InferenceBackend, 2> =
            Tensor::from_data(TensorData::new(floats.to_vec(), [1, 15]), &device);
        let training: Tensor<TrainingBackend, 2> =
            Tensor::from_data(TensorData::new(floats.to_vec(), [1, 15]), &device);

        assert_eq!(inference.dims(), [1, 15]);
        assert_eq!(training.sum().into_scalar(), 4.0);
    }
}
