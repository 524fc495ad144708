//! Initial content loaded into an empty store.

use chrono::{DateTime, TimeZone, Utc};

use super::article::{Article, ArticleStatus};
use super::category::Category;
use super::price::PriceEntry;
use super::settings::{
    AnalyticsSection, FeaturesSection, FooterSection, MetaSection, PriceTickerFeature,
    SiteSection, SiteSettings, SocialSection,
};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn category(
    id: &str,
    name: &str,
    slug: &str,
    description: &str,
    color: &str,
    icon: &str,
    parent: Option<&str>,
    order: u32,
) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: description.to_string(),
        color: color.to_string(),
        icon_name: icon.to_string(),
        featured_image: Some(format!("/images/categories/{slug}.jpg")),
        parent_id: parent.map(str::to_string),
        display_order: order,
    }
}

pub fn categories() -> Vec<Category> {
    vec![
        category("1", "Cryptocurrency News", "crypto-news", "Latest news and updates from the cryptocurrency world", "#3498db", "newspaper", None, 1),
        category("2", "Market Analysis", "market-analysis", "Detailed analysis of cryptocurrency markets, trends, and price movements.", "#4CAF50", "trending_up", None, 2),
        category("3", "Blockchain", "blockchain", "News and information about blockchain technology, developments, and innovations.", "#2196F3", "link", None, 3),
        category("4", "Regulation", "regulation", "Updates on cryptocurrency regulations, legal developments, and policy changes worldwide.", "#FFC107", "gavel", None, 4),
        category("5", "DeFi", "defi", "Decentralized Finance protocols, news, and analysis", "#9b59b6", "account_balance", None, 5),
        category("6", "NFTs", "nft", "Non-Fungible Tokens and the digital art revolution", "#e74c3c", "palette", None, 6),
        category("7", "Bitcoin", "bitcoin", "News and analysis focused on Bitcoin", "#f1c40f", "currency_bitcoin", Some("1"), 1),
        category("8", "Ethereum", "ethereum", "News and analysis focused on Ethereum", "#1abc9c", "diamond", Some("1"), 2),
    ]
}

pub fn articles() -> Vec<Article> {
    let tags = |t: &[&str]| t.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    vec![
        Article {
            id: "1".into(),
            title: "Bitcoin Surges Past $60,000 as Institutional Adoption Increases".into(),
            slug: "bitcoin-surges-past-60000".into(),
            content: "Bitcoin has reached new heights as more institutional investors add the cryptocurrency to their portfolios...".into(),
            excerpt: Some("The leading cryptocurrency continues its bullish trend amid growing institutional interest.".into()),
            category: "market-analysis".into(),
            author: "John Crypto".into(),
            published_at: Some(at(2023, 3, 15, 10, 30, 0)),
            featured_image: Some("/images/articles/bitcoin-surge.jpg".into()),
            tags: tags(&["bitcoin", "price", "institutional-investors"]),
            status: ArticleStatus::Published,
            meta_description: Some("Bitcoin breaks $60,000 as institutional adoption grows and market sentiment remains bullish.".into()),
            created_at: at(2023, 3, 15, 9, 0, 0),
            updated_at: at(2023, 3, 15, 10, 30, 0),
        },
        Article {
            id: "2".into(),
            title: "Ethereum 2.0 Upgrade Timeline: What You Need to Know".into(),
            slug: "ethereum-2-upgrade-timeline".into(),
            content: "The much-anticipated Ethereum 2.0, also known as Eth2 or \"Serenity,\" represents a significant upgrade to the Ethereum network...".into(),
            excerpt: Some("Learn about the upcoming phases of Ethereum's transition to proof-of-stake.".into()),
            category: "blockchain".into(),
            author: "Sarah Blockchain".into(),
            published_at: Some(at(2023, 3, 10, 14, 15, 0)),
            featured_image: Some("/images/articles/ethereum-upgrade.jpg".into()),
            tags: tags(&["ethereum", "eth2", "blockchain"]),
            status: ArticleStatus::Published,
            meta_description: Some("A comprehensive breakdown of Ethereum 2.0's upgrade timeline and what it means for developers and investors.".into()),
            created_at: at(2023, 3, 9, 16, 0, 0),
            updated_at: at(2023, 3, 10, 14, 15, 0),
        },
        Article {
            id: "3".into(),
            title: "SEC Signals New Approach to Crypto Exchange Oversight".into(),
            slug: "sec-signals-new-approach-to-exchange-oversight".into(),
            content: "Regulators outlined a framework for supervising centralized exchanges, with a focus on custody and disclosure...".into(),
            excerpt: Some("A closer look at what the proposed rules mean for exchanges and their users.".into()),
            category: "regulation".into(),
            author: "Maria Ledger".into(),
            published_at: Some(at(2023, 3, 12, 8, 45, 0)),
            featured_image: None,
            tags: tags(&["regulation", "sec", "exchanges"]),
            status: ArticleStatus::Published,
            meta_description: None,
            created_at: at(2023, 3, 11, 18, 20, 0),
            updated_at: at(2023, 3, 12, 8, 45, 0),
        },
        Article {
            id: "4".into(),
            title: "DeFi Lending Rates Explained".into(),
            slug: "defi-lending-rates-explained".into(),
            content: "Lending protocols set rates algorithmically from pool utilization. This guide walks through the models used by the largest markets...".into(),
            excerpt: None,
            category: "defi".into(),
            author: "John Crypto".into(),
            published_at: None,
            featured_image: None,
            tags: tags(&["defi", "lending", "ethereum"]),
            status: ArticleStatus::Draft,
            meta_description: None,
            created_at: at(2023, 3, 16, 11, 0, 0),
            updated_at: at(2023, 3, 16, 11, 0, 0),
        },
        Article {
            id: "5".into(),
            title: "NFT Trading Volume Falls for Third Straight Month".into(),
            slug: "nft-trading-volume-falls".into(),
            content: "Marketplace data shows monthly NFT trading volume down sharply from its peak...".into(),
            excerpt: Some("Collectors pull back as floor prices slide across major collections.".into()),
            category: "nft".into(),
            author: "Sarah Blockchain".into(),
            published_at: Some(at(2022, 12, 1, 9, 0, 0)),
            featured_image: None,
            tags: tags(&["nft", "market"]),
            status: ArticleStatus::Archived,
            meta_description: None,
            created_at: at(2022, 11, 30, 15, 0, 0),
            updated_at: at(2023, 2, 1, 12, 0, 0),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn price(
    id: &str,
    symbol: &str,
    name: &str,
    current_price: f64,
    market_cap: f64,
    rank: u32,
    changes: [f64; 3],
    circulating_supply: f64,
    max_supply: Option<f64>,
    ath: f64,
    ath_date: DateTime<Utc>,
) -> PriceEntry {
    PriceEntry {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        current_price,
        market_cap,
        market_cap_rank: rank,
        price_change_percentage_24h: changes[0],
        price_change_percentage_7d: changes[1],
        price_change_percentage_30d: changes[2],
        circulating_supply,
        max_supply,
        ath,
        ath_date,
        last_updated: at(2023, 3, 15, 10, 30, 0),
    }
}

pub fn prices() -> Vec<PriceEntry> {
    vec![
        price("bitcoin", "btc", "Bitcoin", 57832.45, 1_089_234_567_890.0, 1, [2.34, 5.67, -3.21], 18_845_000.0, Some(21_000_000.0), 69000.0, at(2021, 11, 10, 14, 24, 11)),
        price("ethereum", "eth", "Ethereum", 3245.78, 389_234_567_890.0, 2, [1.23, 3.45, -2.10], 120_250_000.0, None, 4878.26, at(2021, 11, 10, 14, 24, 19)),
        price("binancecoin", "bnb", "BNB", 312.56, 48_123_456_789.0, 4, [0.87, -1.12, 4.05], 153_856_150.0, Some(200_000_000.0), 686.31, at(2021, 5, 10, 7, 24, 17)),
        price("solana", "sol", "Solana", 21.34, 8_234_567_890.0, 11, [-2.45, 6.78, 12.30], 385_913_520.0, None, 259.96, at(2021, 11, 6, 21, 54, 35)),
        price("cardano", "ada", "Cardano", 0.5432, 18_923_456_789.0, 7, [-0.98, 2.34, -5.67], 35_045_020_830.0, Some(45_000_000_000.0), 3.09, at(2021, 9, 2, 6, 0, 10)),
    ]
}

pub fn settings() -> SiteSettings {
    SiteSettings {
        site: SiteSection {
            name: "CoinDailyNews".into(),
            tagline: "Your trusted source for cryptocurrency news and analysis".into(),
            description: "CoinDailyNews provides the latest cryptocurrency news, market analysis, and educational content to help you navigate the digital asset ecosystem.".into(),
            logo_url: "/images/logo.png".into(),
            favicon_url: "/images/favicon.ico".into(),
            theme_color: "#3498db".into(),
        },
        meta: MetaSection {
            title: "CoinDailyNews - Cryptocurrency News and Analysis".into(),
            description: "Stay updated with the latest cryptocurrency news, price analysis, and blockchain technology developments.".into(),
            og_image: "/images/og-image.jpg".into(),
            twitter_handle: "@coindailynews".into(),
            keywords: "cryptocurrency, bitcoin, ethereum, blockchain, crypto news, defi, nft".into(),
        },
        social: SocialSection {
            twitter: "https://twitter.com/coindailynews".into(),
            facebook: "https://facebook.com/coindailynews".into(),
            telegram: "https://t.me/coindailynews".into(),
            discord: "https://discord.gg/coindailynews".into(),
            youtube: "https://youtube.com/coindailynews".into(),
        },
        footer: FooterSection {
            copyright_text: "© 2023 CoinDailyNews. All rights reserved.".into(),
            show_social_links: true,
            show_categories_in_footer: true,
            disclaimer_text: "Information provided on this website is for general information purposes only. It should not be considered financial advice.".into(),
        },
        features: FeaturesSection {
            dark_mode_enabled: true,
            newsletter_enabled: true,
            comments_enabled: true,
            price_ticker: PriceTickerFeature {
                enabled: true,
                coins: vec![
                    "bitcoin".into(),
                    "ethereum".into(),
                    "binancecoin".into(),
                    "cardano".into(),
                    "solana".into(),
                ],
                refresh_interval: 60,
            },
        },
        analytics: AnalyticsSection {
            google_analytics_id: String::new(),
            facebook_pixel_id: String::new(),
            hotjar_id: String::new(),
        },
    }
}
