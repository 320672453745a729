//! Discrete cash dividend schedules.

use super::error::InstrumentError;

/// A single cash dividend paid at `time` years from valuation.
///
/// # Examples
/// ```
/// use pricer_models::instruments::CashDividend;
///
/// let div = CashDividend::new(0.25, 1.0).unwrap();
/// assert_eq!(div.time(), 0.25);
/// assert!(CashDividend::new(-0.1, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashDividend {
    time: f64,
    amount: f64,
}

impl CashDividend {
    /// Creates a dividend; time and amount must be finite and non-negative.
    pub fn new(time: f64, amount: f64) -> Result<Self, InstrumentError> {
        if !time.is_finite() || time < 0.0 || !amount.is_finite() || amount < 0.0 {
            return Err(InstrumentError::InvalidDividend { time, amount });
        }
        Ok(Self { time, amount })
    }

    /// Payment time in years.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Cash amount.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Amount discounted to valuation at a continuously compounded rate.
    #[inline]
    pub fn present_value(&self, rate: f64) -> f64 {
        self.amount * (-rate * self.time).exp()
    }
}

/// Ordered collection of cash dividends.
///
/// Dividends are kept sorted by payment time. Entries at `t = 0` are
/// allowed and count towards the present value.
///
/// # Examples
/// ```
/// use pricer_models::instruments::DividendSchedule;
///
/// let schedule = DividendSchedule::from_pairs(&[0.5, 0.25], &[1.0, 1.0]).unwrap();
/// assert_eq!(schedule.times(), vec![0.25, 0.5]);
/// assert!(schedule.present_value(0.0) == 2.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DividendSchedule {
    dividends: Vec<CashDividend>,
}

impl DividendSchedule {
    /// Builds a schedule, sorting by payment time.
    pub fn new(mut dividends: Vec<CashDividend>) -> Self {
        dividends.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { dividends }
    }

    /// A schedule with no dividends.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a schedule from parallel time and amount slices.
    pub fn from_pairs(times: &[f64], amounts: &[f64]) -> Result<Self, InstrumentError> {
        if times.len() != amounts.len() {
            return Err(InstrumentError::MismatchedDividends {
                times: times.len(),
                amounts: amounts.len(),
            });
        }
        let dividends = times
            .iter()
            .zip(amounts)
            .map(|(&t, &a)| CashDividend::new(t, a))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(dividends))
    }

    /// Fails if any dividend is paid after `maturity`.
    pub fn check_horizon(&self, maturity: f64) -> Result<(), InstrumentError> {
        match self.dividends.iter().find(|d| d.time > maturity) {
            Some(d) => Err(InstrumentError::DividendBeyondExpiry {
                time: d.time,
                expiry: maturity,
            }),
            None => Ok(()),
        }
    }

    /// Sum of all dividends discounted to valuation.
    pub fn present_value(&self, rate: f64) -> f64 {
        self.dividends.iter().map(|d| d.present_value(rate)).sum()
    }

    /// Value at time `from` of the dividends paid strictly after `from`.
    pub fn remaining_value_at(&self, rate: f64, from: f64) -> f64 {
        self.dividends
            .iter()
            .filter(|d| d.time > from)
            .map(|d| d.amount * (-rate * (d.time - from)).exp())
            .sum()
    }

    /// Sum of all dividends paid strictly after valuation, discounted to valuation.
    pub fn future_present_value(&self, rate: f64) -> f64 {
        self.remaining_value_at(rate, 0.0)
    }

    /// Payment times in ascending order.
    pub fn times(&self) -> Vec<f64> {
        self.dividends.iter().map(|d| d.time).collect()
    }

    /// Cash amounts, ordered by payment time.
    pub fn amounts(&self) -> Vec<f64> {
        self.dividends.iter().map(|d| d.amount).collect()
    }

    /// Iterates over dividends in payment order.
    pub fn iter(&self) -> impl Iterator<Item = &CashDividend> {
        self.dividends.iter()
    }

    /// Number of dividends.
    pub fn len(&self) -> usize {
        self.dividends.len()
    }

    /// Returns whether the schedule has no dividends.
    pub fn is_empty(&self) -> bool {
        self.dividends.is_empty()
    }
}

impl FromIterator<CashDividend> for DividendSchedule {
    fn from_iter<I: IntoIterator<Item = CashDividend>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
