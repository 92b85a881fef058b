//! Layer abstraction and the three built-in layer kinds.
//!
//! # Layers
//!
//! A [`Layer`] transforms an input matrix into an output matrix and knows how
//! to propagate a loss gradient back through itself. Three kinds are
//! provided:
//!
//! - [`Dense`] — fully connected affine map with trainable weights and bias
//! - [`Sigmoid`] — elementwise logistic activation
//! - [`Relu`] — elementwise rectifier
//!
//! ## Cache discipline
//!
//! Each layer keeps a single-slot cache of the state its backward pass
//! needs: `Dense` stores deep copies of its latest input and output,
//! activations store only the latest output. Every `forward` call replaces
//! (and thereby drops) the previous cached state, so memory stays bounded
//! across repeated training steps. The cache is a slot, not a stack: calling
//! `forward` twice before `backward` means the backward pass differentiates
//! the most recent call. Interleaving two forward/backward sequences through
//! one layer is not supported.
//!
//! ## Parameter updates
//!
//! `backward` applies plain gradient descent as a side effect:
//! `param -= learning_rate * dparam`. For `Dense` the input gradient is
//! computed from the *pre-update* weights, then the update is applied —
//! the reverse order breaks the chain rule.

use rand::Rng;
use std::fmt;

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Discriminates the built-in layer kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Dense,
    Sigmoid,
    Relu,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dense => write!(f, "Dense"),
            Self::Sigmoid => write!(f, "Sigmoid"),
            Self::Relu => write!(f, "Relu"),
        }
    }
}

/// A unit in a feed-forward pipeline: forward transform plus gradient
/// propagation.
///
/// Implementations own their trainable parameters (if any) and the cached
/// forward state their backward pass reads. See the module docs for the
/// cache discipline.
pub trait Layer {
    /// The layer's kind tag.
    fn kind(&self) -> LayerKind;

    /// Runs the layer on `input`, returning a newly owned output.
    ///
    /// The caller keeps ownership of `input`; the layer stores its own
    /// copies of whatever backward will need, replacing any previously
    /// cached state.
    ///
    /// # Errors
    /// [`Error::DimensionMismatch`] if `input` does not fit the layer.
    fn forward(&mut self, input: &Matrix) -> Result<Matrix>;

    /// Propagates `error_gradient` (loss gradient w.r.t. this layer's last
    /// output) back through the layer, returning the gradient w.r.t. its
    /// last input. Trainable parameters are updated in place with step size
    /// `learning_rate`.
    ///
    /// # Errors
    /// [`Error::NoForwardState`] if no forward call preceded this one;
    /// [`Error::DimensionMismatch`] if `error_gradient` does not match the
    /// cached output's shape.
    fn backward(&mut self, error_gradient: &Matrix, learning_rate: f32) -> Result<Matrix>;

    /// Human-readable one-line description.
    fn describe(&self) -> String {
        self.kind().to_string()
    }
}

/// Fully connected layer: `output = weights x input + bias`.
///
/// Weights are `output_n x input_n`, bias is `output_n x 1`, and inputs are
/// expected as `input_n x 1` column vectors.
pub struct Dense {
    weights: Matrix,
    bias: Matrix,
    d_weight: Matrix,
    d_bias: Matrix,
    inputs: Option<Matrix>,
    output: Option<Matrix>,
}

impl Dense {
    /// Creates a dense layer with Glorot-style initialization: each weight
    /// drawn uniformly from `[-s, s]` with `s = sqrt(2 / (input_n +
    /// output_n))`, bias zeroed. The scaling keeps early-training gradients
    /// well conditioned across layer widths.
    ///
    /// The RNG is caller-supplied so runs are reproducible under a seeded
    /// generator.
    ///
    /// # Errors
    /// [`Error::Allocation`] if either extent is zero.
    pub fn new<R: Rng + ?Sized>(input_n: usize, output_n: usize, rng: &mut R) -> Result<Self> {
        let mut weights = Matrix::new(output_n, input_n)?;
        let s = (2.0 / (input_n + output_n) as f32).sqrt();
        for w in weights.data_mut() {
            *w = rng.random_range(-s..s);
        }

        let bias = Matrix::new(output_n, 1)?;
        let d_weight = Matrix::new(output_n, input_n)?;
        let d_bias = Matrix::new(output_n, 1)?;

        Ok(Self {
            weights,
            bias,
            d_weight,
            d_bias,
            inputs: None,
            output: None,
        })
    }

    /// Creates a dense layer from explicit parameters, for deterministic
    /// construction in tests and drivers.
    ///
    /// # Errors
    /// [`Error::DimensionMismatch`] if `bias` is not `weights.rows() x 1`.
    pub fn with_parameters(weights: Matrix, bias: Matrix) -> Result<Self> {
        if bias.shape() != (weights.rows(), 1) {
            return Err(Error::dimension_mismatch(
                "with_parameters",
                weights.shape(),
                bias.shape(),
            ));
        }
        let d_weight = Matrix::new(weights.rows(), weights.columns())?;
        let d_bias = Matrix::new(bias.rows(), 1)?;
        Ok(Self {
            weights,
            bias,
            d_weight,
            d_bias,
            inputs: None,
            output: None,
        })
    }

    /// The current weight matrix (`output_n x input_n`).
    #[must_use]
    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    /// The current bias vector (`output_n x 1`).
    #[must_use]
    pub fn bias(&self) -> &Matrix {
        &self.bias
    }

    /// Input width.
    #[must_use]
    pub fn input_n(&self) -> usize {
        self.weights.columns()
    }

    /// Output width.
    #[must_use]
    pub fn output_n(&self) -> usize {
        self.weights.rows()
    }
}

impl Layer for Dense {
    fn kind(&self) -> LayerKind {
        LayerKind::Dense
    }

    fn forward(&mut self, input: &Matrix) -> Result<Matrix> {
        let mut output = self.weights.multiply(input)?;
        output.add(&self.bias)?;

        // replace-and-release: the previous cached pair drops here
        self.inputs = Some(input.clone());
        self.output = Some(output.clone());

        Ok(output)
    }

    fn backward(&mut self, error_gradient: &Matrix, learning_rate: f32) -> Result<Matrix> {
        let inputs = self
            .inputs
            .as_ref()
            .ok_or(Error::NoForwardState {
                layer: LayerKind::Dense,
            })?;
        let output = self
            .output
            .as_ref()
            .ok_or(Error::NoForwardState {
                layer: LayerKind::Dense,
            })?;
        if error_gradient.shape() != output.shape() {
            return Err(Error::dimension_mismatch(
                "backward",
                error_gradient.shape(),
                output.shape(),
            ));
        }

        self.d_weight = error_gradient.multiply(&inputs.transpose())?;
        self.d_bias = error_gradient.clone();

        // input gradient must come from the pre-update weights
        let input_gradient = self.weights.transpose().multiply(error_gradient)?;

        self.weights.add_scaled(&self.d_weight, -learning_rate)?;
        self.bias.add_scaled(&self.d_bias, -learning_rate)?;

        Ok(input_gradient)
    }

    fn describe(&self) -> String {
        format!("Dense({} -> {})", self.input_n(), self.output_n())
    }
}

/// Elementwise logistic activation `1 / (1 + e^-x)`.
#[derive(Default)]
pub struct Sigmoid {
    output: Option<Matrix>,
}

impl Sigmoid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layer for Sigmoid {
    fn kind(&self) -> LayerKind {
        LayerKind::Sigmoid
    }

    fn forward(&mut self, input: &Matrix) -> Result<Matrix> {
        let mut output = input.clone();
        for v in output.data_mut() {
            *v = 1.0 / (1.0 + (-*v).exp());
        }
        self.output = Some(output.clone());
        Ok(output)
    }

    fn backward(&mut self, error_gradient: &Matrix, _learning_rate: f32) -> Result<Matrix> {
        let cached = self.output.as_ref().ok_or(Error::NoForwardState {
            layer: LayerKind::Sigmoid,
        })?;
        if error_gradient.shape() != cached.shape() {
            return Err(Error::dimension_mismatch(
                "backward",
                error_gradient.shape(),
                cached.shape(),
            ));
        }

        // derivative via the cached activation: dy/dx = y * (1 - y)
        let mut gradient = error_gradient.clone();
        for (g, &y) in gradient.data_mut().iter_mut().zip(cached.data()) {
            *g *= y * (1.0 - y);
        }
        Ok(gradient)
    }
}

/// Elementwise rectifier `max(0, x)`.
#[derive(Default)]
pub struct Relu {
    output: Option<Matrix>,
}

impl Relu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layer for Relu {
    fn kind(&self) -> LayerKind {
        LayerKind::Relu
    }

    fn forward(&mut self, input: &Matrix) -> Result<Matrix> {
        let mut output = input.clone();
        for v in output.data_mut() {
            if *v < 0.0 {
                *v = 0.0;
            }
        }
        self.output = Some(output.clone());
        Ok(output)
    }

    fn backward(&mut self, error_gradient: &Matrix, _learning_rate: f32) -> Result<Matrix> {
        let cached = self.output.as_ref().ok_or(Error::NoForwardState {
            layer: LayerKind::Relu,
        })?;
        if error_gradient.shape() != cached.shape() {
            return Err(Error::dimension_mismatch(
                "backward",
                error_gradient.shape(),
                cached.shape(),
            ));
        }

        let mut gradient = error_gradient.clone();
        for (g, &y) in gradient.data_mut().iter_mut().zip(cached.data()) {
            if y <= 0.0 {
                *g = 0.0;
            }
        }
        Ok(gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix;

    #[test]
    fn dense_forward_and_backward() {
        let weights = matrix!([[1.0, 2.0], [3.0, 4.0]]);
        let bias = matrix!([[0.5], [-0.5]]);
        let mut dense = Dense::with_parameters(weights, bias).unwrap();

        let input = matrix!([[1.0], [2.0]]);
        let out = dense.forward(&input).unwrap();

        // [[1,2],[3,4]] * [1,2]^T + [0.5,-0.5]^T = [5.5, 10.5]
        assert_eq!(out.data(), &[5.5, 10.5]);

        let grad = matrix!([[1.0], [1.0]]);
        let input_gradient = dense.backward(&grad, 0.0).unwrap();

        // with lr = 0 parameters stay put; dInput = W^T * grad
        assert_eq!(input_gradient.data(), &[4.0, 6.0]);
        assert_eq!(dense.weights().data(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn dense_backward_reads_pre_update_weights() {
        // w = 2, b = 0, input = 3 -> output = 6; grad = 1, lr = 0.5.
        // Correct: dInput = 2 * 1 = 2, then w -= 0.5 * (1 * 3) -> 0.5.
        // The buggy update-first order would report dInput = 0.5.
        let mut dense =
            Dense::with_parameters(matrix!([[2.0]]), matrix!([[0.0]])).unwrap();
        let out = dense.forward(&matrix!([[3.0]])).unwrap();
        assert_eq!(out.data(), &[6.0]);

        let input_gradient = dense.backward(&matrix!([[1.0]]), 0.5).unwrap();
        assert_eq!(input_gradient.data(), &[2.0]);
        assert_eq!(dense.weights().data(), &[0.5]);
        assert_eq!(dense.bias().data(), &[-0.5]);
    }

    #[test]
    fn dense_with_parameters_rejects_bad_bias() {
        let weights = matrix!([[1.0, 2.0], [3.0, 4.0]]);
        let bias = matrix!([[1.0], [2.0], [3.0]]);
        assert!(Dense::with_parameters(weights, bias).is_err());
    }

    #[test]
    fn backward_without_forward_is_an_error() {
        let mut relu = Relu::new();
        let err = relu.backward(&matrix!([[1.0]]), 0.1).unwrap_err();
        assert_eq!(
            err,
            Error::NoForwardState {
                layer: LayerKind::Relu
            }
        );
    }

    #[test]
    fn second_forward_overwrites_the_cache() {
        let mut sigmoid = Sigmoid::new();
        let first = sigmoid.forward(&matrix!([[0.0]])).unwrap();
        assert_eq!(first.data(), &[0.5]);

        // a second forward replaces the cached activation; backward now
        // differentiates the saturated point, not the origin
        let second = sigmoid.forward(&matrix!([[100.0]])).unwrap();
        assert!((second.data()[0] - 1.0).abs() < 1e-6);

        let grad = sigmoid.backward(&matrix!([[1.0]]), 0.0).unwrap();
        assert!(grad.data()[0].abs() < 1e-6);
    }
}
