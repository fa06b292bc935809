//! 建议规则表与每日小贴士

use super::{Suggestion, SuggestionImpact::*, SuggestionRule};

const fn s(
    action: &'static str,
    description: &'static str,
    impact: super::SuggestionImpact,
    icon: &'static str,
    points: i32,
) -> Suggestion {
    Suggestion {
        action,
        description,
        impact,
        icon,
        points,
    }
}

pub const DAILY_TIPS: [&str; 15] = [
    "🌱 Switch to LED bulbs - they use 75% less energy and last 25 times longer!",
    "🚲 Try cycling or walking for short trips under 5km - it's free and healthy!",
    "🥗 Have one plant-based meal a day - it can reduce your food carbon footprint by up to 50%!",
    "💡 Unplug electronics when not in use - they still consume energy in standby mode!",
    "🚗 Carpool or use public transport 2-3 times a week - share the ride, reduce emissions!",
    "🌡️ Lower your thermostat by 2°C in winter - save energy and money!",
    "♻️ Buy second-hand items when possible - extending product life reduces waste!",
    "🌳 Plant a tree or support tree planting initiatives - trees absorb CO2!",
    "💧 Take shorter showers - cutting 2 minutes can save water and energy!",
    "📦 Avoid single-use plastics - bring your own reusable bags and containers!",
    "⚡ Use appliances during off-peak hours - helps balance the energy grid!",
    "🌿 Grow your own herbs and vegetables - fresh, local, and zero transport emissions!",
    "🚆 Choose trains over planes for regional trips - much lower carbon footprint!",
    "🔌 Use power strips to easily turn off multiple devices at once!",
    "🍽️ Plan meals to reduce food waste - wasted food generates methane in landfills!",
];

// ==================== 活动级规则 ====================

/// (类别, 活动) -> 规则
pub const ACTIVITY_RULES: &[(&str, &str, SuggestionRule)] = &[
    (
        "transport",
        "car",
        SuggestionRule {
            title: "Consider Alternative Transportation",
            description: "You're using a car for travel. Here are ways to reduce your transport emissions:",
            suggestions: &[
                s("Try carpooling", "Share rides with coworkers or friends - reduce emissions by 50% per person", High, "🚗", 20),
                s("Use public transport", "Buses and trains emit much less CO2 per passenger than cars", High, "🚌", 25),
                s("Cycle or walk for short trips", "For trips under 5km, cycling is zero-emission and healthy!", Medium, "🚲", 15),
                s("Consider an electric vehicle", "EVs produce 60-70% less emissions than gasoline cars", High, "⚡", 30),
            ],
        },
    ),
    (
        "transport",
        "car_small",
        SuggestionRule {
            title: "Small Car Travel Tips",
            description: "You're already using a smaller car - great! Here's how to optimize further:",
            suggestions: &[
                s("Combine errands", "Plan trips to reduce total distance traveled", Medium, "📋", 10),
                s("Maintain proper tire pressure", "Under-inflated tires increase fuel consumption by 3-5%", Low, "🔧", 5),
                s("Use public transport when possible", "Even small cars can be replaced for some trips", Medium, "🚌", 15),
            ],
        },
    ),
    (
        "transport",
        "car_large",
        SuggestionRule {
            title: "Large Vehicle Optimization",
            description: "Large vehicles have higher emissions. Consider these alternatives:",
            suggestions: &[
                s("Switch to smaller car when possible", "Small cars emit 40-50% less CO2 than large SUVs", High, "🚗", 25),
                s("Carpool regularly", "Fill your vehicle to maximize efficiency", High, "👥", 20),
                s("Consider hybrid or electric", "Modern hybrids can reduce emissions by 30-50%", High, "🔋", 30),
            ],
        },
    ),
    (
        "transport",
        "plane",
        SuggestionRule {
            title: "Reduce Flight Emissions",
            description: "Flying has high carbon impact. Consider these alternatives:",
            suggestions: &[
                s("Choose trains for regional trips", "Trains emit 80-90% less CO2 than planes for distances under 500km", High, "🚆", 30),
                s("Use video conferencing", "Many business trips can be replaced with virtual meetings", Medium, "💻", 15),
                s("Offset flight emissions", "Support carbon offset programs when flying is necessary", Low, "🌳", 10),
            ],
        },
    ),
    (
        "diet",
        "beef",
        SuggestionRule {
            title: "Reduce Meat Consumption",
            description: "Beef has one of the highest carbon footprints. Try these alternatives:",
            suggestions: &[
                s("Try plant-based proteins", "Beans, lentils, and tofu have 90% lower emissions than beef", High, "🥗", 25),
                s("Have meat-free days", "Try 2-3 plant-based meals per week - it makes a big difference!", High, "🌱", 20),
                s("Choose chicken or fish instead", "Chicken produces 6x less CO2 than beef per kilogram", Medium, "🐟", 15),
            ],
        },
    ),
    (
        "diet",
        "lamb",
        SuggestionRule {
            title: "Lamb Consumption Tips",
            description: "Lamb has high emissions. Consider these alternatives:",
            suggestions: &[
                s("Switch to plant-based proteins", "Legumes and nuts have much lower carbon footprints", High, "🥜", 25),
                s("Reduce portion sizes", "Smaller portions mean less emissions", Medium, "🍽️", 10),
            ],
        },
    ),
    (
        "diet",
        "chicken",
        SuggestionRule {
            title: "Optimize Your Diet",
            description: "Chicken is better than red meat, but you can do more:",
            suggestions: &[
                s("Add more plant-based meals", "Try Meatless Mondays - it's an easy way to reduce emissions", Medium, "🌱", 15),
                s("Buy local and seasonal", "Reduces transport emissions from food", Low, "🏪", 5),
            ],
        },
    ),
    (
        "diet",
        "fish",
        SuggestionRule {
            title: "Sustainable Seafood Choices",
            description: "Fish is a good protein choice. Here's how to optimize:",
            suggestions: &[
                s("Choose sustainably caught fish", "Look for MSC-certified seafood", Low, "🐟", 5),
                s("Add more plant proteins", "Mix fish with legumes and vegetables", Medium, "🥗", 10),
            ],
        },
    ),
    (
        "energy",
        "electricity_grid",
        SuggestionRule {
            title: "Reduce Electricity Usage",
            description: "High electricity consumption increases your carbon footprint. Here's how to reduce it:",
            suggestions: &[
                s("Switch to LED bulbs", "LEDs use 75% less energy and last 25x longer than incandescent bulbs", High, "💡", 20),
                s("Turn off devices when not in use", "Unplug electronics or use power strips - standby mode still uses energy", Medium, "🔌", 15),
                s("Use energy-efficient appliances", "Look for Energy Star rated appliances - they use 10-50% less energy", High, "⭐", 25),
                s("Install a smart thermostat", "Programmable thermostats can reduce heating/cooling by 10-15%", Medium, "🌡️", 20),
                s("Use natural light during day", "Open curtains and reduce artificial lighting when possible", Low, "☀️", 10),
            ],
        },
    ),
    (
        "energy",
        "natural_gas",
        SuggestionRule {
            title: "Reduce Natural Gas Usage",
            description: "Natural gas contributes to your carbon footprint. Consider these tips:",
            suggestions: &[
                s("Lower thermostat by 2°C", "You'll save 5-10% on heating costs and emissions", Medium, "🌡️", 15),
                s("Improve home insulation", "Better insulation reduces heating needs significantly", High, "🏠", 25),
                s("Use a programmable thermostat", "Reduce heating when you're away or sleeping", Medium, "⏰", 15),
            ],
        },
    ),
    (
        "shopping",
        "clothing",
        SuggestionRule {
            title: "Sustainable Shopping Habits",
            description: "Clothing production has high emissions. Make sustainable choices:",
            suggestions: &[
                s("Buy second-hand", "Thrift shopping extends product life and reduces waste", High, "♻️", 20),
                s("Choose quality over quantity", "Buy fewer, better-made items that last longer", Medium, "✨", 15),
                s("Support sustainable brands", "Look for brands using recycled materials and ethical practices", Medium, "🌿", 15),
            ],
        },
    ),
    (
        "shopping",
        "electronics",
        SuggestionRule {
            title: "Reduce Electronic Waste",
            description: "Electronics have high carbon footprints. Be mindful:",
            suggestions: &[
                s("Extend device lifespan", "Keep your devices longer - repairs are often cheaper than replacement", High, "🔧", 25),
                s("Buy refurbished", "Refurbished electronics are cheaper and reduce waste", High, "♻️", 20),
                s("Recycle old devices properly", "E-waste recycling prevents toxic materials from landfills", Medium, "📱", 15),
            ],
        },
    ),
    (
        "lifestyle",
        "streaming_hour",
        SuggestionRule {
            title: "Reduce Digital Carbon Footprint",
            description: "Streaming uses energy. Here are some tips:",
            suggestions: &[
                s("Lower video quality when possible", "HD uses less data than 4K - you often won't notice the difference", Low, "📺", 5),
                s("Download instead of streaming", "Downloaded content uses less energy than repeated streaming", Low, "⬇️", 5),
            ],
        },
    ),
    (
        "lifestyle",
        "shower_10min",
        SuggestionRule {
            title: "Reduce Water and Energy Usage",
            description: "Hot showers use both water and energy. Try these tips:",
            suggestions: &[
                s("Take shorter showers", "Cut 2 minutes off your shower - save water and energy", Medium, "⏱️", 15),
                s("Install a low-flow showerhead", "Reduces water usage by 40-60% without losing pressure", Medium, "🚿", 20),
                s("Use cooler water", "Slightly cooler showers use less energy to heat", Low, "🌡️", 10),
            ],
        },
    ),
];

// ==================== 类别级通用规则 ====================

pub const CATEGORY_RULES: &[(&str, SuggestionRule)] = &[
    (
        "transport",
        SuggestionRule {
            title: "Reduce Transportation Emissions",
            description: "Here are general tips to reduce your transport carbon footprint:",
            suggestions: &[
                s("Use public transport", "Buses and trains are more efficient per passenger", High, "🚌", 20),
                s("Carpool when possible", "Sharing rides reduces emissions per person", Medium, "👥", 15),
                s("Walk or cycle for short trips", "Zero emissions and great for your health", Medium, "🚲", 15),
            ],
        },
    ),
    (
        "diet",
        SuggestionRule {
            title: "Sustainable Food Choices",
            description: "Food production has significant emissions. Here's how to reduce:",
            suggestions: &[
                s("Eat more plant-based meals", "Try 2-3 plant-based days per week", High, "🌱", 20),
                s("Buy local and seasonal", "Reduces transport emissions from food", Medium, "🏪", 15),
                s("Reduce food waste", "Plan meals and use leftovers creatively", Medium, "🍽️", 15),
            ],
        },
    ),
    (
        "energy",
        SuggestionRule {
            title: "Reduce Energy Consumption",
            description: "Here are ways to lower your energy usage:",
            suggestions: &[
                s("Switch to LED bulbs", "LEDs use 75% less energy", High, "💡", 20),
                s("Unplug unused electronics", "Standby mode still consumes energy", Medium, "🔌", 15),
                s("Use energy-efficient appliances", "Look for Energy Star ratings", High, "⭐", 25),
            ],
        },
    ),
    (
        "shopping",
        SuggestionRule {
            title: "Sustainable Shopping",
            description: "Make eco-friendly shopping choices:",
            suggestions: &[
                s("Buy second-hand", "Extend product life and reduce waste", High, "♻️", 20),
                s("Choose quality over quantity", "Fewer, longer-lasting items", Medium, "✨", 15),
            ],
        },
    ),
    (
        "lifestyle",
        SuggestionRule {
            title: "Eco-Friendly Lifestyle",
            description: "Small lifestyle changes can make a big difference:",
            suggestions: &[
                s("Reduce water usage", "Shorter showers and fix leaks", Medium, "💧", 15),
                s("Recycle and compost", "Proper waste management reduces emissions", Medium, "♻️", 15),
            ],
        },
    ),
];

pub const DEFAULT_RULE: SuggestionRule = SuggestionRule {
    title: "Reduce Your Carbon Footprint",
    description: "Here are some general tips:",
    suggestions: &[s(
        "Track your emissions regularly",
        "Awareness is the first step to reduction",
        Low,
        "📊",
        10,
    )],
};
