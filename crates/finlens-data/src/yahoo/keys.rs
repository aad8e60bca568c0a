//! Line-item keys requested from the Yahoo fundamentals timeseries.
//!
//! Keys are CamelCase identifiers; the timeseries type for a key is the key
//! prefixed by the reporting frequency, e.g. `annualTotalRevenue`.

use crate::statement::StatementKind;

const INCOME_STATEMENT_KEYS: &[&str] = &[
    "TotalRevenue",
    "OperatingRevenue",
    "CostOfRevenue",
    "GrossProfit",
    "OperatingExpense",
    "SellingGeneralAndAdministration",
    "ResearchAndDevelopment",
    "OperatingIncome",
    "InterestIncome",
    "InterestExpense",
    "NetInterestIncome",
    "OtherIncomeExpense",
    "PretaxIncome",
    "TaxProvision",
    "NetIncomeContinuousOperations",
    "NetIncome",
    "NetIncomeCommonStockholders",
    "BasicEPS",
    "DilutedEPS",
    "BasicAverageShares",
    "DilutedAverageShares",
    "TotalExpenses",
    "EBIT",
    "EBITDA",
];

const BALANCE_SHEET_KEYS: &[&str] = &[
    "TotalAssets",
    "CurrentAssets",
    "CashAndCashEquivalents",
    "CashCashEquivalentsAndShortTermInvestments",
    "Receivables",
    "Inventory",
    "TotalNonCurrentAssets",
    "NetPPE",
    "Goodwill",
    "TotalLiabilitiesNetMinorityInterest",
    "CurrentLiabilities",
    "AccountsPayable",
    "CurrentDebt",
    "TotalNonCurrentLiabilitiesNetMinorityInterest",
    "LongTermDebt",
    "TotalDebt",
    "NetDebt",
    "StockholdersEquity",
    "CommonStockEquity",
    "RetainedEarnings",
    "TotalEquityGrossMinorityInterest",
    "WorkingCapital",
    "InvestedCapital",
    "TangibleBookValue",
    "ShareIssued",
    "OrdinarySharesNumber",
];

const CASH_FLOW_KEYS: &[&str] = &[
    "OperatingCashFlow",
    "NetIncomeFromContinuingOperations",
    "DepreciationAndAmortization",
    "StockBasedCompensation",
    "ChangeInWorkingCapital",
    "InvestingCashFlow",
    "CapitalExpenditure",
    "FinancingCashFlow",
    "IssuanceOfDebt",
    "RepaymentOfDebt",
    "RepurchaseOfCapitalStock",
    "CashDividendsPaid",
    "BeginningCashPosition",
    "EndCashPosition",
    "FreeCashFlow",
    "IncomeTaxPaidSupplementalData",
    "InterestPaidSupplementalData",
];

/// Keys requested for a statement, in display order.
pub const fn statement_keys(kind: StatementKind) -> &'static [&'static str] {
    match kind {
        StatementKind::IncomeStatement => INCOME_STATEMENT_KEYS,
        StatementKind::BalanceSheet => BALANCE_SHEET_KEYS,
        StatementKind::CashFlow => CASH_FLOW_KEYS,
    }
}

/// Turn a CamelCase key into a spaced label.
///
/// A space goes before an upper-case letter that follows a lower-case letter
/// or digit, and before the last capital of an acronym that starts a new
/// word: `NetPPE` -> `Net PPE`, `EBITDA` -> `EBITDA`, `PPEGross` -> `PPE Gross`.
pub fn key_to_label(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut label = String::with_capacity(key.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                label.push(' ');
            }
        }
        label.push(c);
    }

    label
}
