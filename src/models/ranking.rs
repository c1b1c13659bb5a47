use serde::{Deserialize, Serialize};

use crate::models::MetricCategory;

/// Position of one city nationally and within its state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRanking {
    pub city: String,
    pub state_name: String,
    pub category: MetricCategory,
    pub national_pop_rank: usize,
    pub national_violent_rank: usize,
    pub national_property_rank: usize,
    pub state_pop_rank: usize,
    pub state_violent_rank: usize,
    pub state_property_rank: usize,
    pub national_count: usize,
    pub state_count: usize,
}

/// The two ranking summary panels shown under the charts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingPanels {
    pub left: String,
    pub right: String,
}

impl RankingPanels {
    pub fn from_ranking(ranking: &CityRanking) -> Self {
        let vio_text = ranking.category.violent_text();
        let prop_text = ranking.category.property_text();
        let state = &ranking.state_name;

        let left = format!(
            "{} is......\n\n\
             the #{} largest city in the Country\n\
             Ranked #{} in national {}\n\
             Ranked #{} in national {}\n",
            ranking.city,
            ranking.national_pop_rank,
            ranking.national_violent_rank,
            vio_text,
            ranking.national_property_rank,
            prop_text,
        );

        let right = format!(
            "\n\n\
             the #{} largest city in {}\n\
             Ranked #{} for {} in {}\n\
             Ranked #{} for {} in {}\n",
            ranking.state_pop_rank,
            state,
            ranking.state_violent_rank,
            vio_text,
            state,
            ranking.state_property_rank,
            prop_text,
            state,
        );

        Self { left, right }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_panel_text() {
        let ranking = CityRanking {
            city: "Albany, NY".to_string(),
            state_name: "New York".to_string(),
            category: MetricCategory::RawCount,
            national_pop_rank: 2,
            national_violent_rank: 1,
            national_property_rank: 3,
            state_pop_rank: 2,
            state_violent_rank: 1,
            state_property_rank: 2,
            national_count: 3,
            state_count: 2,
        };

        let panels = RankingPanels::from_ranking(&ranking);

        assert_eq!(
            panels.left,
            "Albany, NY is......\n\n\
             the #2 largest city in the Country\n\
             Ranked #1 in national violent crimes\n\
             Ranked #3 in national property crimes\n"
        );
        assert_eq!(
            panels.right,
            "\n\nthe #2 largest city in New York\n\
             Ranked #1 for violent crimes in New York\n\
             Ranked #2 for property crimes in New York\n"
        );
    }
}
