//! Constant filter policies, selected by platform identity.

use scrapeplan_core::{
    DiscussionFilters, FilterPolicy, MarketAnalysisFilters, MarketplaceFilters, Platform,
    SocialFilters, SortOrder, TimeWindow,
};

pub const DISCUSSION_FILTERS: DiscussionFilters = DiscussionFilters {
    time_filter: TimeWindow::Year,
    sort: SortOrder::Top,
    min_score: 10,
    min_comments: 5,
    limit_per_community: 100,
};

pub const MARKETPLACE_FILTERS: MarketplaceFilters = MarketplaceFilters {
    min_reviews: 10,
    min_rating: 1.0,
    max_rating: 5.0,
    min_review_sample: 50,
    verified_only: false,
};

pub const SOCIAL_FILTERS: SocialFilters = SocialFilters {
    min_likes: 100,
    time_window: TimeWindow::Month,
    max_posts: 200,
};

pub const MARKET_ANALYSIS_FILTERS: MarketAnalysisFilters = MarketAnalysisFilters {
    include_market_size: true,
    include_growth_trends: true,
    include_competition: true,
    include_pricing: true,
};

#[must_use]
pub const fn filter_policy(platform: Platform) -> FilterPolicy {
    match platform {
        Platform::Reddit => FilterPolicy::Discussion(DISCUSSION_FILTERS),
        Platform::Amazon => FilterPolicy::Marketplace(MARKETPLACE_FILTERS),
        Platform::Instagram | Platform::Tiktok => FilterPolicy::Social(SOCIAL_FILTERS),
        Platform::MarketAnalysis => FilterPolicy::MarketAnalysis(MARKET_ANALYSIS_FILTERS),
    }
}
