//! Polynomials with coefficients in a Galois field
//!
//! Coefficients are stored most-significant term first, so `[1, 0, 5]` is
//! x² + 5. The leading coefficient is never zero except for the zero
//! polynomial itself, which is the single coefficient `[0]`.
//!
//! Values are immutable: every operation returns a new polynomial.

use super::error::{RsError, RsResult};
use super::galois::GaloisField;
use std::fmt;

/// Polynomial over one [`GaloisField`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaloisPoly<'f> {
    field: &'f GaloisField,
    coefficients: Vec<u16>,
}

impl<'f> GaloisPoly<'f> {
    /// Create a polynomial from coefficients, most significant first
    ///
    /// Leading zeros are stripped. Fails on an empty slice or on a
    /// coefficient that is not an element of `field`.
    pub fn new(field: &'f GaloisField, coefficients: &[u16]) -> RsResult<Self> {
        if coefficients.is_empty() {
            return Err(RsError::EmptyCoefficients);
        }
        if let Some((index, &value)) = coefficients
            .iter()
            .enumerate()
            .find(|&(_, &c)| !field.contains(c))
        {
            return Err(RsError::SymbolOutOfRange {
                index,
                value,
                size: field.size(),
            });
        }

        let first_non_zero = coefficients.iter().position(|&c| c != 0);
        let coefficients = match first_non_zero {
            Some(start) => coefficients[start..].to_vec(),
            None => vec![0],
        };
        Ok(Self {
            field,
            coefficients,
        })
    }

    /// Wrap coefficients that are already in range and have no leading zero
    pub(crate) fn from_stripped(field: &'f GaloisField, coefficients: Vec<u16>) -> Self {
        debug_assert!(!coefficients.is_empty());
        debug_assert!(coefficients.len() == 1 || coefficients[0] != 0);
        Self {
            field,
            coefficients,
        }
    }

    /// Strip leading zeros from an arithmetic result
    fn from_raw(field: &'f GaloisField, mut coefficients: Vec<u16>) -> Self {
        let leading_zeros = coefficients
            .iter()
            .take(coefficients.len().saturating_sub(1))
            .take_while(|&&c| c == 0)
            .count();
        if coefficients.is_empty() {
            coefficients.push(0);
        } else if leading_zeros > 0 {
            coefficients.drain(..leading_zeros);
        }
        Self::from_stripped(field, coefficients)
    }

    /// Field the coefficients belong to
    #[inline]
    pub fn field(&self) -> &'f GaloisField {
        self.field
    }

    /// Coefficients, most significant first
    #[inline]
    pub fn coefficients(&self) -> &[u16] {
        &self.coefficients
    }

    /// Degree of the polynomial (0 for constants, including zero)
    #[inline]
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// True for the zero polynomial
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficients[0] == 0
    }

    /// Coefficient of the x^degree term
    pub fn coefficient(&self, degree: usize) -> u16 {
        if degree > self.degree() {
            return 0;
        }
        self.coefficients[self.coefficients.len() - 1 - degree]
    }

    /// Coefficient of the highest-degree term
    #[inline]
    pub fn leading_coefficient(&self) -> u16 {
        self.coefficients[0]
    }

    /// Evaluate at `a` with Horner's method
    pub fn evaluate_at(&self, a: u16) -> u16 {
        match a {
            0 => self.coefficient(0),
            // Every power of 1 is 1: the value is the sum of the coefficients
            1 => self.coefficients.iter().fold(0, |acc, &c| acc ^ c),
            _ => self
                .coefficients
                .iter()
                .fold(0, |acc, &c| self.field.multiply(a, acc) ^ c),
        }
    }

    /// Sum (equivalently, difference) of two polynomials
    pub fn add_or_subtract(&self, other: &GaloisPoly<'f>) -> RsResult<Self> {
        self.check_field(other)?;
        if self.is_zero() {
            return Ok(other.clone());
        }
        if other.is_zero() {
            return Ok(self.clone());
        }

        let (larger, smaller) = if self.coefficients.len() >= other.coefficients.len() {
            (&self.coefficients, &other.coefficients)
        } else {
            (&other.coefficients, &self.coefficients)
        };
        let offset = larger.len() - smaller.len();

        let mut sum = larger.clone();
        for (term, &c) in sum[offset..].iter_mut().zip(smaller.iter()) {
            *term ^= c;
        }
        Ok(Self::from_raw(self.field, sum))
    }

    /// Product of two polynomials
    pub fn multiply(&self, other: &GaloisPoly<'f>) -> RsResult<Self> {
        self.check_field(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(self.field.zero());
        }

        let a = &self.coefficients;
        let b = &other.coefficients;
        let mut product = vec![0u16; a.len() + b.len() - 1];
        for (i, &a_coeff) in a.iter().enumerate() {
            for (j, &b_coeff) in b.iter().enumerate() {
                product[i + j] ^= self.field.multiply(a_coeff, b_coeff);
            }
        }
        Ok(Self::from_raw(self.field, product))
    }

    /// Multiply every coefficient by `scalar`
    pub fn multiply_scalar(&self, scalar: u16) -> Self {
        match scalar {
            0 => self.field.zero(),
            1 => self.clone(),
            _ => {
                let scaled = self
                    .coefficients
                    .iter()
                    .map(|&c| self.field.multiply(c, scalar))
                    .collect();
                Self::from_raw(self.field, scaled)
            }
        }
    }

    /// Multiply by `coefficient * x^degree`
    pub fn multiply_by_monomial(&self, degree: usize, coefficient: u16) -> Self {
        if coefficient == 0 || self.is_zero() {
            return self.field.zero();
        }
        let mut product = Vec::with_capacity(self.coefficients.len() + degree);
        product.extend(
            self.coefficients
                .iter()
                .map(|&c| self.field.multiply(c, coefficient)),
        );
        product.resize(self.coefficients.len() + degree, 0);
        Self::from_raw(self.field, product)
    }

    /// Long division, returning `(quotient, remainder)`
    pub fn divide(&self, other: &GaloisPoly<'f>) -> RsResult<(Self, Self)> {
        self.check_field(other)?;
        if other.is_zero() {
            return Err(RsError::DivideByZeroPolynomial);
        }

        let mut quotient = self.field.zero();
        let mut remainder = self.clone();

        let inverse_denominator_leading_term = self.field.inverse(other.leading_coefficient())?;

        // Each pass cancels the remainder's leading term
        while remainder.degree() >= other.degree() && !remainder.is_zero() {
            let degree_difference = remainder.degree() - other.degree();
            let scale = self.field.multiply(
                remainder.leading_coefficient(),
                inverse_denominator_leading_term,
            );
            let term = other.multiply_by_monomial(degree_difference, scale);
            let iteration_quotient = self.field.build_monomial(degree_difference, scale);
            quotient = quotient.add_or_subtract(&iteration_quotient)?;
            remainder = remainder.add_or_subtract(&term)?;
        }

        Ok((quotient, remainder))
    }

    /// Formal derivative
    ///
    /// In characteristic 2, k·c is c for odd k and 0 for even k, so only the
    /// odd-power terms survive, each dropping one degree.
    pub fn formal_derivative(&self) -> Self {
        let degree = self.degree();
        if degree == 0 {
            return self.field.zero();
        }
        let derivative = (1..=degree)
            .rev()
            .map(|k| if k % 2 == 1 { self.coefficient(k) } else { 0 })
            .collect();
        Self::from_raw(self.field, derivative)
    }

    fn check_field(&self, other: &GaloisPoly<'f>) -> RsResult<()> {
        if self.field.same_field(other.field) {
            Ok(())
        } else {
            Err(RsError::FieldMismatch)
        }
    }
}

impl fmt::Display for GaloisPoly<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for degree in (0..=self.degree()).rev() {
            let coefficient = self.coefficient(degree);
            if coefficient == 0 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;

            // Nonzero, so the logarithm exists
            let alpha_power = self.field.log(coefficient).unwrap_or(0);
            match (alpha_power, degree) {
                (0, 0) => write!(f, "1")?,
                (0, _) => {}
                (1, _) => write!(f, "a")?,
                (p, _) => write!(f, "a^{}", p)?,
            }
            match degree {
                0 => {}
                1 => write!(f, "x")?,
                d => write!(f, "x^{}", d)?,
            }
        }
        Ok(())
    }
}
