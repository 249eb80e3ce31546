//! Static lookup tables used by the text and identity generators.

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Christopher", "Lisa", "Daniel", "Nancy", "Matthew", "Betty", "Anthony",
    "Margaret", "Mark", "Sandra", "Donald", "Ashley", "Steven", "Kimberly", "Paul", "Emily",
    "Andrew", "Donna", "Joshua", "Michelle", "Kenneth", "Dorothy", "Kevin", "Carol", "Brian",
    "Amanda", "George", "Melissa", "Timothy", "Deborah", "Ronald", "Stephanie", "Edward",
    "Rebecca", "Jason", "Sharon", "Jeffrey", "Laura", "Ryan", "Cynthia", "Jacob", "Kathleen",
    "Gary", "Amy",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall",
    "Rivera", "Campbell", "Mitchell", "Carter", "Roberts", "Gomez", "Phillips", "Evans",
    "Turner", "Diaz", "Parker", "Cruz", "Edwards", "Collins", "Reyes", "Stewart", "Morris",
    "Morales", "Murphy",
];

pub const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com", "yahoo.com", "hotmail.com", "outlook.com", "icloud.com", "mail.com",
    "protonmail.com", "example.com", "test.com", "email.com",
];

pub const WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "it", "for", "not", "on", "with",
    "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we", "say",
    "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their", "what",
    "so", "up", "out", "if", "about", "who", "get", "which", "go", "me", "when", "make", "can",
    "like", "time", "no", "just", "him", "know", "take", "people", "into", "year", "your",
    "good", "some", "could", "them", "see", "other", "than", "then", "now", "look", "only",
    "come", "its", "over", "think", "also", "back", "after", "use", "two", "how", "our", "work",
    "first", "well", "way", "even", "new", "want", "because", "any", "these", "give", "day",
    "most", "us", "great", "world", "need", "feel", "high", "system", "data", "user", "app",
    "code", "test", "build", "run", "api",
];

pub const NOUNS: &[&str] = &[
    "time", "year", "people", "way", "day", "man", "woman", "child", "world", "life", "hand",
    "part", "place", "case", "week", "company", "system", "program", "question", "work",
    "government", "number", "night", "point", "home", "water", "room", "mother", "area",
    "money", "story", "fact", "month", "lot", "right", "study", "book", "eye", "job", "word",
    "business", "issue", "side", "kind", "head", "house", "service", "friend", "father",
    "power", "hour", "game", "line", "end", "member", "law", "car", "city", "community", "name",
    "president", "team", "minute", "idea", "body", "bit",
];

pub const ADJECTIVES: &[&str] = &[
    "good", "new", "first", "last", "long", "great", "little", "own", "other", "old", "right",
    "big", "high", "different", "small", "large", "next", "early", "young", "important", "few",
    "public", "bad", "same", "able", "free", "sure", "clear", "full", "special", "easy",
    "strong", "certain", "local", "recent", "likely", "simple", "major", "economic", "hot",
    "international", "low", "best", "better", "real", "available", "late", "possible", "hard",
    "general", "true",
];

pub const VERBS: &[&str] = &[
    "be", "have", "do", "say", "get", "make", "go", "know", "take", "see", "come", "think",
    "look", "want", "give", "use", "find", "tell", "ask", "work", "seem", "feel", "try",
    "leave", "call", "keep", "let", "begin", "show", "hear", "play", "run", "move", "like",
    "live", "believe", "hold", "bring", "happen", "write", "provide", "sit", "stand", "lose",
    "pay", "meet",
];

pub const CITIES: &[&str] = &[
    "New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "Philadelphia", "San Antonio",
    "San Diego", "Dallas", "San Jose", "Austin", "Jacksonville", "Fort Worth", "Columbus",
    "San Francisco", "Charlotte", "Indianapolis", "Seattle", "Denver", "Boston", "Nashville",
    "Portland", "Las Vegas", "Miami", "London", "Paris", "Tokyo", "Sydney", "Toronto", "Berlin",
    "Amsterdam", "Singapore", "Dubai", "Hong Kong", "Seoul", "Mumbai", "Barcelona", "Rome",
];

pub const COUNTRIES: &[&str] = &[
    "United States", "United Kingdom", "Canada", "Australia", "Germany", "France", "Japan",
    "China", "India", "Brazil", "Mexico", "Spain", "Italy", "Netherlands", "Sweden", "Norway",
    "Denmark", "Finland", "Switzerland", "Austria", "Belgium", "Ireland", "New Zealand",
    "Singapore", "South Korea", "Portugal", "Poland",
];

pub const STREET_SUFFIXES: &[&str] = &[
    "Street", "Avenue", "Boulevard", "Drive", "Lane", "Road", "Way", "Place", "Court", "Circle",
    "Trail", "Parkway", "Commons", "Square", "Terrace",
];

pub const COMPANY_SUFFIXES: &[&str] = &[
    "Inc", "LLC", "Corp", "Ltd", "Co", "Group", "Solutions", "Technologies", "Systems",
    "Services", "Industries", "Enterprises", "Partners", "Holdings",
];

pub const TLD: &[&str] = &[
    "com", "org", "net", "io", "co", "dev", "app", "tech", "ai", "cloud",
];

pub const LOREM_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
    "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris",
    "nisi", "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
    "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui",
    "officia", "deserunt", "mollit", "anim", "id", "est", "laborum",
];
