// Chart series domain models

/// Which value axis a dataset is meant to be drawn against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Primary,
    Secondary,
}

impl Axis {
    pub fn id(self) -> &'static str {
        match self {
            Axis::Primary => "y",
            Axis::Secondary => "y1",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub values: Vec<f64>,
    pub axis: Axis,
    pub color: Option<String>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, values: Vec<f64>, axis: Axis) -> Self {
        Self {
            name: name.into(),
            values,
            axis,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Labels plus datasets sharing one label axis
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl Series {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            datasets: Vec::new(),
        }
    }

    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    /// Every dataset has exactly one value per label
    pub fn is_aligned(&self) -> bool {
        self.datasets
            .iter()
            .all(|d| d.values.len() == self.labels.len())
    }

    #[cfg(test)]
    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name == name)
    }
}
