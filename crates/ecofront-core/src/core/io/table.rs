use super::TableError;
use crate::core::models::allocation::Allocation;
use crate::core::models::ids::ScenarioId;
use crate::core::models::point::EvaluatedPoint;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub const DEFAULT_GWP_COLUMN: usize = 15;
pub const DEFAULT_NPV_COLUMN: usize = 19;

pub const GWP_HEADER: &str = "Total GWP";
pub const NPV_HEADER: &str = "Total NPV";

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationColumn {
    pub product: String,
    pub column: usize,
}

/// Zero-based positions of the fields of a pre-evaluated scenario table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub gwp_column: usize,
    pub npv_column: usize,
    pub allocation_columns: Vec<AllocationColumn>,
    pub has_headers: bool,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            gwp_column: DEFAULT_GWP_COLUMN,
            npv_column: DEFAULT_NPV_COLUMN,
            allocation_columns: Vec::new(),
            has_headers: true,
        }
    }
}

impl ColumnLayout {
    /// Layout of the table written by [`write_points`].
    pub fn for_points_table<S: AsRef<str>>(products: &[S]) -> Self {
        let allocation_columns = products
            .iter()
            .enumerate()
            .map(|(i, p)| AllocationColumn {
                product: p.as_ref().to_string(),
                column: i + 1,
            })
            .collect();
        Self {
            gwp_column: products.len() + 1,
            npv_column: products.len() + 2,
            allocation_columns,
            has_headers: true,
        }
    }
}

/// Reads one [`EvaluatedPoint`] per data row; the row index becomes the scenario id.
pub fn read_points<R: Read>(
    reader: R,
    layout: &ColumnLayout,
) -> Result<Vec<EvaluatedPoint>, TableError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(layout.has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let gwp = numeric_field(&record, row, layout.gwp_column, GWP_HEADER)?;
        let npv = numeric_field(&record, row, layout.npv_column, NPV_HEADER)?;

        let mut allocation = Allocation::new();
        for column in &layout.allocation_columns {
            let value = numeric_field(&record, row, column.column, &column.product)?;
            allocation.set(&column.product, value);
        }

        points.push(EvaluatedPoint::new(ScenarioId(row), gwp, npv, allocation));
    }
    Ok(points)
}

pub fn read_points_from_path(
    path: &Path,
    layout: &ColumnLayout,
) -> Result<Vec<EvaluatedPoint>, TableError> {
    let file = File::open(path).map_err(|e| TableError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    read_points(file, layout)
}

/// Writes the evaluated-point table: `Scenario, <Product> %..., Total GWP, Total NPV`.
pub fn write_points<W: Write>(
    writer: W,
    points: &[EvaluatedPoint],
    products: &[String],
) -> Result<(), TableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["Scenario".to_string()];
    header.extend(products.iter().map(|p| percent_header(p)));
    header.push(GWP_HEADER.to_string());
    header.push(NPV_HEADER.to_string());
    csv_writer.write_record(&header)?;

    for point in points {
        let mut record = vec![point.id.code()];
        record.extend(allocation_cells(&point.allocation, products));
        record.push(point.gwp.to_string());
        record.push(point.npv.to_string());
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush().map_err(|e| TableError::Csv(e.into()))?;
    Ok(())
}

/// Writes Pareto-front members: `Total GWP, Total NPV, <Product> %...`.
pub fn write_front<W: Write>(
    writer: W,
    members: &[EvaluatedPoint],
    products: &[String],
) -> Result<(), TableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec![GWP_HEADER.to_string(), NPV_HEADER.to_string()];
    header.extend(products.iter().map(|p| percent_header(p)));
    csv_writer.write_record(&header)?;

    for member in members {
        let mut record = vec![member.gwp.to_string(), member.npv.to_string()];
        record.extend(allocation_cells(&member.allocation, products));
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush().map_err(|e| TableError::Csv(e.into()))?;
    Ok(())
}

pub(crate) fn create_file(path: &Path) -> Result<File, TableError> {
    File::create(path).map_err(|e| TableError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

pub fn write_points_to_path(
    path: &Path,
    points: &[EvaluatedPoint],
    products: &[String],
) -> Result<(), TableError> {
    write_points(create_file(path)?, points, products)
}

pub fn write_front_to_path(
    path: &Path,
    members: &[EvaluatedPoint],
    products: &[String],
) -> Result<(), TableError> {
    write_front(create_file(path)?, members, products)
}

/// Product names in the allocation order of the first point.
pub fn products_of(points: &[EvaluatedPoint]) -> Vec<String> {
    points
        .first()
        .map(|p| p.allocation.products().map(str::to_string).collect())
        .unwrap_or_default()
}

fn percent_header(product: &str) -> String {
    format!("{} %", product)
}

fn allocation_cells(allocation: &Allocation, products: &[String]) -> Vec<String> {
    products
        .iter()
        .map(|p| allocation.get(p).map(|v| v.to_string()).unwrap_or_default())
        .collect()
}

fn numeric_field(
    record: &StringRecord,
    row: usize,
    column: usize,
    name: &str,
) -> Result<f64, TableError> {
    let raw = record.get(column).ok_or_else(|| TableError::MissingColumn {
        row,
        column,
        name: name.to_string(),
    })?;
    let value = raw.parse::<f64>().map_err(|_| TableError::InvalidNumber {
        row,
        column,
        name: name.to_string(),
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(TableError::NonFiniteNumber {
            row,
            column,
            name: name.to_string(),
            value: raw.to_string(),
        });
    }
    Ok(value)
}
