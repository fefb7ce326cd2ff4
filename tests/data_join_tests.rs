use approx::assert_relative_eq;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sp500_charts::core::PricePoint;
use sp500_charts::data::parse::{
    parse_calendar_date, parse_decimal_opt, parse_percent_fraction, parse_return, parse_year,
};
use sp500_charts::data::{
    KeyedAuxiliary, columns, field, join_by_key, join_companies, normalize_price_series,
    normalize_year_returns, parse_rows, price_point_from_row, year_return_from_row,
};

const COMPANIES_CSV: &str = "\
Company,Symbol,Weight,Price
Apple Inc.,AAPL,7.0%,190.10
Microsoft Corp,MSFT,6.5%,410.00
Delisted Co,GONE,0.1%,1.00
";

const PERFORMANCE_CSV: &str = "\
Symbol,YTD Return
AAPL,12.5%
MSFT,-3.2%
";

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn percent_fraction_parsing_matches_reference_examples() {
    assert_relative_eq!(parse_percent_fraction("12.3%"), 0.123, epsilon = 1e-12);
    assert_eq!(parse_percent_fraction(""), 0.0);
    assert_eq!(parse_percent_fraction("n/a"), 0.0);
    assert_relative_eq!(parse_percent_fraction(" 0.25 % "), 0.0025, epsilon = 1e-12);
}

#[test]
fn returns_keep_percent_units_and_reject_garbage() {
    assert_eq!(parse_return("-4.21%"), Some(-4.21));
    assert_eq!(parse_return("7"), Some(7.0));
    assert_eq!(parse_return(""), None);
    assert_eq!(parse_return("--"), None);
}

#[test]
fn decimal_and_year_parsers_are_lenient() {
    assert_eq!(parse_decimal_opt("26.89"), Some(Decimal::new(2689, 2)));
    assert_eq!(parse_decimal_opt("x"), None);
    assert_eq!(parse_year("2019"), Some(2019));
    assert_eq!(parse_year("2019.0"), Some(2019));
    assert_eq!(parse_year(""), None);
}

#[test]
fn calendar_dates_accept_common_layouts() {
    assert_eq!(parse_calendar_date("2020-02-29"), Some(ymd(2020, 2, 29)));
    assert_eq!(parse_calendar_date("2020/02/29"), Some(ymd(2020, 2, 29)));
    assert_eq!(parse_calendar_date("02/29/2020"), Some(ymd(2020, 2, 29)));
    assert_eq!(parse_calendar_date("2020-02-29T00:00:00Z"), Some(ymd(2020, 2, 29)));
    assert_eq!(parse_calendar_date("not a date"), None);
}

#[test]
fn companies_join_performance_by_symbol() {
    let companies = parse_rows("sp.csv", COMPANIES_CSV).expect("companies");
    let performance = parse_rows("sp_performance.csv", PERFORMANCE_CSV).expect("performance");

    let records = join_companies(companies, performance);
    assert_eq!(records.len(), 3);

    let apple = &records[0];
    assert_eq!(apple.symbol, "AAPL");
    assert_eq!(apple.name, "Apple Inc.");
    assert_relative_eq!(apple.weight, 0.07, epsilon = 1e-12);
    assert_eq!(apple.price, "190.10");
    assert_eq!(apple.ytd_return_text, "12.5%");
    assert_eq!(apple.ytd_return, Some(12.5));

    assert_eq!(records[1].ytd_return, Some(-3.2));
}

#[test]
fn unmatched_symbols_get_blank_return_without_failing() {
    let companies = parse_rows("sp.csv", COMPANIES_CSV).expect("companies");
    let performance = parse_rows("sp_performance.csv", PERFORMANCE_CSV).expect("performance");

    let records = join_companies(companies, performance);
    let gone = records
        .iter()
        .find(|record| record.symbol == "GONE")
        .expect("unmatched record is kept");
    assert_eq!(gone.ytd_return_text, "");
    assert_eq!(gone.ytd_return, None);
    assert!(!gone.has_return());
}

#[test]
fn first_auxiliary_row_wins_for_duplicate_keys() {
    let primary = parse_rows("primary", "Symbol\nAAPL\n").expect("primary");
    let auxiliary = parse_rows("aux", "Symbol,YTD Return\nAAPL,\nAAPL,5%\nAAPL,9%\n").expect("aux");

    let joined = join_by_key(
        primary,
        columns::SYMBOL,
        &[KeyedAuxiliary::new(auxiliary, columns::SYMBOL, &[columns::YTD_RETURN])],
    );
    assert_eq!(field(&joined[0], columns::YTD_RETURN), "5%");
}

#[test]
fn malformed_weight_defaults_to_zero() {
    let companies = parse_rows("sp.csv", "Company,Symbol,Weight,Price\nOdd,ODD,lots,\n").expect("rows");
    let records = join_companies(companies, Vec::new());
    assert_eq!(records[0].weight, 0.0);
    assert_eq!(records[0].price, "");
}

#[test]
fn price_rows_without_dates_are_dropped() {
    let rows = parse_rows("index_data.csv", "Date,SP500\n2001-01-01,1320.28\nbad,12\n2002-01-01,\n")
        .expect("rows");
    let points: Vec<PricePoint> = rows.iter().filter_map(price_point_from_row).collect();
    assert_eq!(
        points,
        vec![
            PricePoint::new(ymd(2001, 1, 1), 1320.28),
            PricePoint::new(ymd(2002, 1, 1), 0.0),
        ]
    );
}

#[test]
fn price_series_is_filtered_sorted_and_deduplicated() {
    let series = normalize_price_series(
        vec![
            PricePoint::new(ymd(1990, 1, 1), 330.0),
            PricePoint::new(ymd(1975, 1, 1), 70.0),
            PricePoint::new(ymd(1985, 1, 1), 170.0),
            PricePoint::new(ymd(1990, 1, 1), 339.0),
            PricePoint::new(ymd(1980, 1, 1), 110.0),
        ],
        1980,
    );

    let dates: Vec<NaiveDate> = series.iter().map(|point| point.date).collect();
    assert_eq!(dates, vec![ymd(1980, 1, 1), ymd(1985, 1, 1), ymd(1990, 1, 1)]);
    assert_eq!(series[2].value, 339.0);
}

#[test]
fn runs_of_repeated_dates_collapse_to_the_last_row() {
    let series = normalize_price_series(
        vec![
            PricePoint::new(ymd(2001, 3, 1), 1.0),
            PricePoint::new(ymd(2001, 3, 1), 2.0),
            PricePoint::new(ymd(2001, 4, 1), 4.0),
            PricePoint::new(ymd(2001, 3, 1), 3.0),
        ],
        1980,
    );
    let values: Vec<f64> = series.iter().map(|point| point.value).collect();
    assert_eq!(values, vec![3.0, 4.0]);
}

#[test]
fn year_returns_are_filtered_and_sorted() {
    let rows = parse_rows(
        "history.csv",
        "Year,Performance\n2011,2.11\n2008,-37.0\n2009,26.46\n2010,15.06\n",
    )
    .expect("rows");
    let returns = normalize_year_returns(rows.iter().filter_map(year_return_from_row).collect(), 2009);

    let years: Vec<i32> = returns.iter().map(|entry| entry.year).collect();
    assert_eq!(years, vec![2009, 2010, 2011]);
    assert_eq!(returns[0].performance, Decimal::new(2646, 2));
}
