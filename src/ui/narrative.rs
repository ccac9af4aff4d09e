use eframe::egui::{RichText, Ui};

// ---------------------------------------------------------------------------
// Static report text
// ---------------------------------------------------------------------------

pub const TITLE: &str = "Retail Pricing and Sales Analysis Dashboard";

pub const OVERVIEW: &str = "This project explores the relationship between product pricing, \
units ordered, and total sales in a retail environment. By leveraging transactional sales data, \
the goal is to uncover patterns in bulk purchasing behavior and volume-based discounts, \
ultimately supporting data-driven recommendations for pricing and promotional strategies.";

pub const PROCESSING_SUMMARY: &[(&str, &[&str])] = &[
    (
        "Handled Missing Values",
        &[
            "Dropped columns with more than 30% missing data.",
            "Imputed missing values in numerical columns using the median.",
            "Imputed missing values in categorical columns using the mode.",
        ],
    ),
    (
        "Handled Outliers",
        &[
            "Used the Interquartile Range (IQR) method to detect and optionally cap extreme values.",
            "Removed rows where unitsordered was 0 to avoid divide-by-zero errors.",
        ],
    ),
    (
        "Feature Engineering",
        &[
            "Converted salesdate to a date value for time-based filtering.",
            "Created avg_price_per_unit = sales / unitsordered to analyze pricing efficiency.",
        ],
    ),
    (
        "Filtering Capabilities",
        &["Interactive filtering by date range and a toggle to view hypothesis testing results."],
    ),
];

pub const INSIGHTS: &[&str] = &[
    "Most products are priced under the median, with a right-skewed distribution.",
    "A clear inverse trend between quantity ordered and average unit price confirms bulk discounting.",
    "Units ordered and sales are strongly correlated.",
];

pub const RECOMMENDATIONS: &[&str] = &[
    "Introduce tiered pricing based on order size to capitalize on bulk buyer behavior.",
    "Use customer segmentation to tailor discount strategies for high-volume purchasers.",
    "Promote best-performing SKUs in larger bundles or seasonal offers.",
];

/// Result of a two-sample t-test run offline on the full dataset.
/// Display-only; it does not follow the active date range.
pub struct HypothesisResult {
    pub null_hypothesis: &'static str,
    pub alternative: &'static str,
    pub t_statistic: f64,
    pub p_value: f64,
    pub conclusion: &'static str,
}

pub const HYPOTHESIS: HypothesisResult = HypothesisResult {
    null_hypothesis: "There is no significant difference in average price per unit for small vs. large orders.",
    alternative: "The average price per unit is lower for large orders.",
    t_statistic: 11.598,
    p_value: 0.0,
    conclusion: "Since p < 0.05, we reject H₀. Large orders do have significantly lower average unit prices.",
};

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

fn bullets(ui: &mut Ui, items: &[&str]) {
    for item in items {
        ui.label(format!("•  {item}"));
    }
}

pub fn overview(ui: &mut Ui) {
    ui.heading("Project Overview");
    ui.label(OVERVIEW);
    ui.add_space(8.0);

    ui.strong("Data Processing Summary");
    for (topic, items) in PROCESSING_SUMMARY {
        ui.label(RichText::new(*topic).strong());
        ui.indent(*topic, |ui: &mut Ui| bullets(ui, items));
    }
}

pub fn insights(ui: &mut Ui) {
    ui.heading("Insights");
    bullets(ui, INSIGHTS);
}

pub fn recommendations(ui: &mut Ui) {
    ui.heading("Recommendations");
    bullets(ui, RECOMMENDATIONS);
}

pub fn hypothesis(ui: &mut Ui) {
    let h = &HYPOTHESIS;
    ui.heading("Hypothesis Testing");
    ui.label(RichText::new(format!("Null Hypothesis (H₀): {}", h.null_hypothesis)));
    ui.label(RichText::new(format!("Alternative Hypothesis (H₁): {}", h.alternative)));
    let t = format!("T-Statistic: {:.3}", h.t_statistic);
    let p = format!("P-Value: {:.5}", h.p_value);
    bullets(ui, &[t.as_str(), p.as_str()]);
    ui.label(format!("Result: {}", h.conclusion));
}
