//! Quadratic Sort Growth
//!
//! Measures how the operation count of four quadratic sorts grows with input
//! size:
//! - **Bubble sort** and **optimized bubble sort**: adjacent-swap passes
//! - **Insertion sort**: walk each element left into place
//! - **Selection sort**: swap the minimum of the unsorted tail into place
//!
//! The pipeline runs many random trials per algorithm ([`TrialRunner`]), stores
//! the counts as a comma-separated [`TrialTable`], averages each column into an
//! [`AverageSeries`], and hands the series to a [`PlotSurface`] or a
//! [`GrowthReport`].

pub mod aggregate;
pub mod config;
pub mod counting_sort;
pub mod error;
pub mod files;
pub mod plot;
pub mod report;
pub mod table;
pub mod trial;

pub use aggregate::{average_columns, file_column_averages, AverageSeries};
pub use config::{ExperimentConfig, PlotConfig};
pub use counting_sort::{
    bubble_sort, insertion_sort, is_sorted, opt_bubble_sort, selection_sort, Algorithm,
};
pub use error::{GrowthError, Result};
pub use files::{find_tables, select_table, TableSelection};
pub use plot::{plot_average_series, AxesStyle, PlotElement, PlotSurface, SvgPlot};
pub use report::{parse_lino_report, GrowthCurve, GrowthReport};
pub use table::{parse_csv, TrialTable};
pub use trial::{run_trial, run_trials, sample_sequence, TrialRunner};
