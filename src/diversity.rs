use std::collections::HashMap;
use std::fmt;

const MOST_COMMON: usize = 3;

/// How varied a batch of drawn User-Agents is.
#[derive(Debug, Clone, PartialEq)]
pub struct DiversityReport {
    pub total: usize,
    pub unique: usize,
    /// Strings drawn more than once, most frequent first.
    pub most_common: Vec<(String, usize)>,
}

impl DiversityReport {
    pub fn from_samples<S: AsRef<str>>(samples: &[S]) -> DiversityReport {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        // first position of each string keeps ties stable
        let mut order: Vec<&str> = Vec::new();
        for sample in samples {
            let ua = sample.as_ref();
            let count = counts.entry(ua).or_insert(0);
            if *count == 0 {
                order.push(ua);
            }
            *count += 1;
        }

        let mut repeated: Vec<(String, usize)> = order
            .into_iter()
            .map(|ua| (ua.to_string(), counts[ua]))
            .filter(|(_, count)| *count > 1)
            .collect();
        repeated.sort_by(|a, b| b.1.cmp(&a.1));
        repeated.truncate(MOST_COMMON);

        DiversityReport {
            total: samples.len(),
            unique: counts.len(),
            most_common: repeated,
        }
    }

    /// Percentage of draws repeating an earlier draw.
    pub fn duplication_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.total - self.unique) as f64 / self.total as f64 * 100.0
        }
    }
}

impl fmt::Display for DiversityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total generated:    {}", self.total)?;
        writeln!(f, "Unique user agents: {}", self.unique)?;
        write!(f, "Duplication rate:   {:.1}%", self.duplication_rate())?;
        for (ua, count) in &self.most_common {
            write!(f, "\n  {}x {}", count, truncate(ua, 70))?;
        }
        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max).collect::<String>())
    } else {
        s.to_string()
    }
}
