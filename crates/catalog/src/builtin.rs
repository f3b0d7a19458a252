use crate::Destination;

pub(crate) fn builtin_destinations() -> Vec<Destination> {
    vec![
        Destination::new("Pakistan", 30.37, 69.34)
            .origin()
            .with_services(
                "International Cargo Hub, Air Freight, Express Cargo, Door-to-Door Delivery",
            )
            .with_routing("Main Hubs: Lahore (LHE), Islamabad (ISB), Karachi (KHI)")
            .with_transit("Domestic: Same day | International: 1-7 days")
            .with_detail(
                "Operating from major cities: Lahore, Islamabad, and Karachi. We provide \
                 comprehensive international cargo services to all major destinations worldwide.",
            ),
        Destination::new("United Kingdom", 54.0, -2.0)
            .with_services("Air Freight, Express Cargo, Door-to-Door Delivery, Customs Clearance")
            .with_routing("LHE → DXB → LHR")
            .with_transit("3-5 business days")
            .with_detail(
                "Primary European hub with daily flights and comprehensive customs support.",
            ),
        Destination::new("United States", 39.0, -98.0)
            .with_services("Air Freight, Sea Freight, Express Delivery, Customs Brokerage")
            .with_routing("LHE → DXB → JFK/ORD/LAX")
            .with_transit("5-7 business days")
            .with_detail(
                "Direct and connecting flights to major US cities with full customs clearance.",
            ),
        Destination::new("UAE / Dubai", 25.0, 55.0)
            .with_services("Express Air Cargo, Next-Day Delivery, Warehousing")
            .with_routing("LHE → DXB (Direct)")
            .with_transit("1-2 business days")
            .with_detail("Fastest route with next-day delivery options and local warehousing."),
        Destination::new("Saudi Arabia", 24.0, 45.0)
            .with_services("Door-to-Door Cargo, Air Freight, Commercial Shipments")
            .with_routing("LHE → DXB → RUH/JED")
            .with_transit("2-4 business days")
            .with_detail("Reliable service to Riyadh, Jeddah, and other major Saudi cities."),
        Destination::new("Canada", 56.0, -106.0)
            .with_services("Air Freight, Express Cargo, Customs Clearance")
            .with_routing("LHE → LHR → YYZ/YVR")
            .with_transit("5-7 business days")
            .with_detail("Service to Toronto, Vancouver, and other major Canadian cities."),
        Destination::new("Qatar", 25.3, 51.5)
            .with_services("Air Cargo, Express Delivery, Commercial Freight")
            .with_routing("KHI → DOH (Direct)")
            .with_transit("1-3 business days")
            .with_detail("Specialized handling for Qatar with direct flights from Karachi."),
    ]
}
