/// How polygons with more than three corners are split into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Triangulation {
    /// Fan around corner 0 emitting `n / 2 + n % 2` triangles. Exact for
    /// quads and pentagons; polygons with six or more corners lose their
    /// trailing triangles.
    #[default]
    Compat,
    /// Complete fan around corner 0 emitting `n - 2` triangles.
    Fan,
}

impl Triangulation {
    /// Number of triangles emitted for a polygon with `corners` corners.
    pub fn triangle_count(self, corners: usize) -> usize {
        if corners < 3 {
            return 0;
        }
        if corners == 3 {
            return 1;
        }
        match self {
            Triangulation::Compat => corners / 2 + corners % 2,
            Triangulation::Fan => corners - 2,
        }
    }
}

pub const DEFAULT_SCAN_PROGRESS_STEP: usize = 64 * 1024;
pub const DEFAULT_RESOLVE_PROGRESS_STEP: usize = 4096;
pub const DEFAULT_WORKER_NAME: &str = "objmesh-loader";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    scan_progress_step: usize,
    resolve_progress_step: usize,
    triangulation: Triangulation,
    worker_name: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            scan_progress_step: DEFAULT_SCAN_PROGRESS_STEP,
            resolve_progress_step: DEFAULT_RESOLVE_PROGRESS_STEP,
            triangulation: Triangulation::default(),
            worker_name: DEFAULT_WORKER_NAME.to_string(),
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum number of consumed bytes between two scan progress reports.
    /// Clamped to at least 1.
    pub fn with_scan_progress_step(mut self, step: usize) -> Self {
        self.scan_progress_step = step.max(1);
        self
    }

    /// Minimum number of processed corners between two resolve progress
    /// reports. Clamped to at least 1.
    pub fn with_resolve_progress_step(mut self, step: usize) -> Self {
        self.resolve_progress_step = step.max(1);
        self
    }

    pub fn with_triangulation(mut self, triangulation: Triangulation) -> Self {
        self.triangulation = triangulation;
        self
    }

    pub fn with_worker_name(mut self, name: impl Into<String>) -> Self {
        self.worker_name = name.into();
        self
    }

    pub fn scan_progress_step(&self) -> usize {
        self.scan_progress_step
    }

    pub fn resolve_progress_step(&self) -> usize {
        self.resolve_progress_step
    }

    pub fn triangulation(&self) -> Triangulation {
        self.triangulation
    }

    pub fn worker_name(&self) -> &str {
        &self.worker_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compat_triangle_counts() {
        let t = Triangulation::Compat;
        assert_eq!(t.triangle_count(3), 1);
        assert_eq!(t.triangle_count(4), 2);
        assert_eq!(t.triangle_count(5), 3);
        assert_eq!(t.triangle_count(6), 3);
        assert_eq!(t.triangle_count(7), 4);
    }

    #[test]
    fn test_fan_triangle_counts() {
        let t = Triangulation::Fan;
        assert_eq!(t.triangle_count(3), 1);
        assert_eq!(t.triangle_count(6), 4);
        assert_eq!(t.triangle_count(2), 0);
    }

    #[test]
    fn test_builder() {
        let options = LoadOptions::new()
            .with_scan_progress_step(0)
            .with_resolve_progress_step(16)
            .with_triangulation(Triangulation::Fan)
            .with_worker_name("bg");
        assert_eq!(options.scan_progress_step(), 1);
        assert_eq!(options.resolve_progress_step(), 16);
        assert_eq!(options.triangulation(), Triangulation::Fan);
        assert_eq!(options.worker_name(), "bg");
        assert_eq!(
            LoadOptions::default().scan_progress_step(),
            DEFAULT_SCAN_PROGRESS_STEP
        );
    }
}
