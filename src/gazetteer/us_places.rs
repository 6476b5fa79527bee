//! Built-in US place and state tables
//!
//! Places: (label, latitude, longitude, extra aliases). The lowercased
//! label is always a key.

pub(super) const PLACES: &[(&str, f64, f64, &[&str])] = &[
    ("New York", 40.7128, -74.0060, &["nyc"]),
    ("Los Angeles", 34.0522, -118.2437, &["la"]),
    ("Chicago", 41.8781, -87.6298, &[]),
    ("Houston", 29.7604, -95.3698, &[]),
    ("Philadelphia", 39.9526, -75.1652, &[]),
    ("Phoenix", 33.4484, -112.0740, &[]),
    ("San Antonio", 29.4241, -98.4936, &[]),
    ("San Diego", 32.7157, -117.1611, &[]),
    ("Dallas", 32.7767, -96.7970, &[]),
    ("Austin", 30.2672, -97.7431, &[]),
    ("San Jose", 37.3382, -121.8863, &[]),
    ("Fort Worth", 32.7555, -97.3308, &[]),
    ("Columbus", 39.9612, -82.9988, &[]),
    ("Charlotte", 35.2271, -80.8431, &[]),
    ("Indianapolis", 39.7684, -86.1581, &[]),
    ("San Francisco", 37.7749, -122.4194, &["sf"]),
    ("Seattle", 47.6062, -122.3321, &[]),
    ("Denver", 39.7392, -104.9903, &[]),
    ("Washington DC", 38.9072, -77.0369, &["washington", "dc"]),
    ("Boston", 42.3601, -71.0589, &[]),
    ("Nashville", 36.1627, -86.7816, &[]),
    ("Baltimore", 39.2904, -76.6122, &[]),
    ("Oklahoma City", 35.4676, -97.5164, &[]),
    ("Portland", 45.5152, -122.6784, &[]),
    ("Las Vegas", 36.1699, -115.1398, &["vegas"]),
    ("Milwaukee", 43.0389, -87.9065, &[]),
    ("Albuquerque", 35.0844, -106.6504, &[]),
    ("Tucson", 32.2226, -110.9747, &[]),
    ("Fresno", 36.7378, -119.7871, &[]),
    ("Sacramento", 38.5816, -121.4944, &[]),
    ("Mesa", 33.4152, -111.8315, &[]),
    ("Kansas City", 39.0997, -94.5786, &[]),
    ("Atlanta", 33.7490, -84.3880, &[]),
    ("Omaha", 41.2565, -95.9345, &[]),
    ("Colorado Springs", 38.8339, -104.8214, &[]),
    ("Raleigh", 35.7796, -78.6382, &[]),
    ("Miami", 25.7617, -80.1918, &[]),
    ("Cleveland", 41.4993, -81.6944, &[]),
    ("Tulsa", 36.1540, -95.9928, &[]),
    ("Minneapolis", 44.9778, -93.2650, &[]),
    ("Wichita", 37.6872, -97.3301, &[]),
    ("Arlington", 32.7357, -97.1081, &[]),
    ("New Orleans", 29.9511, -90.0715, &["nola"]),
    ("Bakersfield", 35.3733, -119.0187, &[]),
    ("Tampa", 27.9506, -82.4572, &[]),
    ("Honolulu", 21.3099, -157.8581, &[]),
    ("Anaheim", 33.8366, -117.9143, &[]),
    ("Santa Ana", 33.7455, -117.8677, &[]),
    ("Corpus Christi", 27.8006, -97.3964, &[]),
    ("Riverside", 33.9533, -117.3961, &[]),
    ("Lexington", 38.0406, -84.5037, &[]),
    ("Pittsburgh", 40.4406, -79.9959, &[]),
    ("St. Louis", 38.6270, -90.1994, &["saint louis", "st louis"]),
    ("Cincinnati", 39.1031, -84.5120, &[]),
    ("Anchorage", 61.2181, -149.9003, &[]),
    ("Stockton", 37.9577, -121.2908, &[]),
    ("Toledo", 41.6528, -83.5379, &[]),
    ("St. Paul", 44.9537, -93.0900, &["saint paul", "st paul"]),
    ("Newark", 40.7357, -74.1724, &[]),
    ("Greensboro", 36.0726, -79.7920, &[]),
    ("Plano", 33.0198, -96.6989, &[]),
    ("Henderson", 36.0395, -114.9817, &[]),
    ("Lincoln", 40.8136, -96.7026, &[]),
    ("Buffalo", 42.8864, -78.8784, &[]),
    ("Jersey City", 40.7178, -74.0431, &[]),
    ("Chula Vista", 32.6401, -117.0842, &[]),
    ("Fort Wayne", 41.0793, -85.1394, &[]),
    ("Orlando", 28.5383, -81.3792, &[]),
    ("St. Petersburg", 27.7676, -82.6403, &["saint petersburg", "st petersburg"]),
    ("Chandler", 33.3062, -111.8413, &[]),
    ("Laredo", 27.5806, -99.4803, &[]),
    ("Norfolk", 36.9068, -76.2859, &[]),
    ("Durham", 35.9940, -78.8986, &[]),
    ("Madison", 43.0731, -89.4012, &[]),
    ("Lubbock", 33.5779, -101.8552, &[]),
    ("Irvine", 33.6846, -117.8265, &[]),
    ("Winston-Salem", 36.0999, -80.2442, &["winston salem"]),
    ("Glendale", 33.5387, -112.1860, &[]),
    ("Garland", 32.9126, -96.6389, &[]),
    ("Hialeah", 25.8576, -80.2781, &[]),
    ("Reno", 39.5296, -119.8138, &[]),
    ("Chesapeake", 36.7682, -76.2875, &[]),
    ("Gilbert", 33.3528, -111.7890, &[]),
    ("Baton Rouge", 30.4515, -91.1871, &[]),
    ("Irving", 32.8140, -96.9489, &[]),
    ("Scottsdale", 33.4942, -111.9261, &[]),
    ("North Las Vegas", 36.1989, -115.1175, &[]),
    ("Fremont", 37.5485, -121.9886, &[]),
    ("Boise", 43.6150, -116.2023, &[]),
    ("Richmond", 37.5407, -77.4360, &[]),
    ("San Bernardino", 34.1083, -117.2898, &[]),
    ("Birmingham", 33.5186, -86.8104, &[]),
    ("Spokane", 47.6587, -117.4260, &[]),
    ("Rochester", 43.1566, -77.6088, &[]),
    ("Des Moines", 41.5868, -93.6250, &[]),
    ("Modesto", 37.6391, -120.9969, &[]),
    ("Fayetteville", 35.0527, -78.8784, &[]),
    ("Tacoma", 47.2529, -122.4443, &[]),
    ("Oxnard", 34.1975, -119.1771, &[]),
    ("Fontana", 34.0922, -117.4350, &[]),
    ("Montgomery", 32.3668, -86.3000, &[]),
    ("Moreno Valley", 33.9425, -117.2297, &[]),
    ("Shreveport", 32.5252, -93.7502, &[]),
    ("Aurora", 39.7294, -104.8319, &[]),
    ("Yonkers", 40.9312, -73.8988, &[]),
    ("Akron", 41.0814, -81.5190, &[]),
    ("Huntington Beach", 33.7091, -118.0067, &[]),
    ("Little Rock", 34.7465, -92.2896, &[]),
    ("Augusta", 33.4735, -82.0105, &[]),
    ("Amarillo", 35.2220, -101.8313, &[]),
    ("Mobile", 30.6954, -88.0399, &[]),
    ("Grand Rapids", 42.9634, -85.6681, &[]),
    ("Salt Lake City", 40.7608, -111.8910, &["slc"]),
    ("Tallahassee", 30.4518, -84.2807, &[]),
    ("Huntsville", 34.7304, -86.5861, &[]),
    ("Grand Prairie", 32.7460, -96.9978, &[]),
    ("Knoxville", 35.9606, -83.9207, &[]),
    ("Worcester", 42.2626, -71.8023, &[]),
    ("Newport News", 37.0871, -76.4730, &[]),
    ("Brownsville", 25.9018, -97.4975, &[]),
    ("Overland Park", 38.9822, -94.6708, &[]),
    ("Santa Clarita", 34.3917, -118.5426, &[]),
    ("Providence", 41.8240, -71.4128, &[]),
    ("Garden Grove", 33.7739, -117.9414, &[]),
    ("Chattanooga", 35.0456, -85.3097, &[]),
    ("Oceanside", 33.1959, -117.3795, &[]),
    ("Jackson", 32.2988, -90.1848, &[]),
    ("Fort Lauderdale", 26.1224, -80.1373, &[]),
    ("Santa Rosa", 38.4404, -122.7144, &[]),
    ("Rancho Cucamonga", 34.1064, -117.5931, &[]),
    ("Port St. Lucie", 27.2730, -80.3582, &["port saint lucie", "port st lucie"]),
    ("Tempe", 33.4255, -111.9400, &[]),
    ("Ontario", 34.0633, -117.6509, &[]),
    ("Vancouver", 45.6387, -122.6615, &[]),
    ("Cape Coral", 26.5629, -81.9495, &[]),
    ("Sioux Falls", 43.5446, -96.7311, &[]),
    ("Springfield", 37.2153, -93.2982, &[]),
    ("Peoria", 40.6936, -89.5890, &[]),
    ("Pembroke Pines", 26.0070, -80.2962, &[]),
    ("Elk Grove", 38.4088, -121.3716, &[]),
    ("Salem", 44.9429, -123.0351, &[]),
    ("Lancaster", 34.6868, -118.1542, &[]),
    ("Corona", 33.8753, -117.5664, &[]),
    ("Eugene", 44.0521, -123.0868, &[]),
    ("Palmdale", 34.5794, -118.1165, &[]),
    ("Salinas", 36.6777, -121.6555, &[]),
    ("Pasadena", 34.1478, -118.1445, &[]),
    ("Fort Collins", 40.5853, -105.0844, &[]),
    ("Hayward", 37.6688, -122.0808, &[]),
    ("Pomona", 34.0552, -117.7500, &[]),
    ("Cary", 35.7915, -78.7811, &[]),
    ("Rockford", 42.2711, -89.0940, &[]),
    ("Alexandria", 38.8048, -77.0469, &[]),
    ("Escondido", 33.1192, -117.0864, &[]),
    ("McKinney", 33.1973, -96.6397, &[]),
    ("Joliet", 41.5250, -88.0817, &[]),
    ("Sunnyvale", 37.3688, -122.0363, &[]),
];

/// (code, name)
pub(super) const REGIONS: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Extra region aliases: (alias, code)
pub(super) const REGION_ALIASES: &[(&str, &str)] = &[
    ("cali", "CA"),
    ("socal", "CA"),
    ("norcal", "CA"),
    ("washington state", "WA"),
    ("washington dc", "DC"),
    ("washington d.c.", "DC"),
    ("new york state", "NY"),
];
