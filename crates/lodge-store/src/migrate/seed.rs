//! Version-1 schema and seed data.
//!
//! Seed timestamps are fixed so that replaying the chain from scratch always
//! produces the same rows. Seeded credentials are plaintext; they are
//! upgraded to argon2 hashes on first successful login.

pub const SCHEMA: &str = "
CREATE TABLE SystemVariables (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);

CREATE TABLE Users (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    roles    TEXT,           -- JSON array of role tags
    status   TEXT            -- 'active' | 'inactive'
);

CREATE TABLE Buildings (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT,
    location TEXT,
    capacity INTEGER,
    status   TEXT
);

CREATE TABLE Floors (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    buildingId  INTEGER,
    floorNumber TEXT,
    description TEXT,
    FOREIGN KEY(buildingId) REFERENCES Buildings(id)
);

CREATE TABLE Rooms (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    floorId          INTEGER,
    roomNumber       TEXT,
    capacity         INTEGER,
    currentOccupancy INTEGER,
    status           TEXT,   -- 'available' | 'occupied' | 'maintenance' | 'reserved'
    FOREIGN KEY(floorId) REFERENCES Floors(id)
);

CREATE TABLE Employees (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    fullName        TEXT,
    nationalId      TEXT UNIQUE,
    phone           TEXT,
    department      TEXT,
    status          TEXT,
    contractEndDate TEXT
);

-- checkOutDate IS NULL means the employee is still housed.
CREATE TABLE Assignments (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    employeeId           INTEGER,
    roomId               INTEGER,
    checkInDate          TEXT,
    expectedCheckOutDate TEXT,
    checkOutDate         TEXT,
    FOREIGN KEY(employeeId) REFERENCES Employees(id),
    FOREIGN KEY(roomId) REFERENCES Rooms(id)
);

CREATE TABLE MaintenanceRequests (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    roomId      INTEGER,
    problemType TEXT,
    description TEXT,
    status      TEXT,        -- 'open' | 'in_progress' | 'resolved'
    reportedAt  TEXT,
    FOREIGN KEY(roomId) REFERENCES Rooms(id)
);

CREATE TABLE Reservations (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    roomId            INTEGER,
    guestName         TEXT,
    checkInDate       TEXT,
    checkOutDate      TEXT,
    notes             TEXT,
    guestIdCardNumber TEXT,
    guestPhone        TEXT,
    guestPosition     TEXT,
    department        TEXT,
    FOREIGN KEY(roomId) REFERENCES Rooms(id)
);

-- Append-only. No UPDATE or DELETE is issued against this table.
CREATE TABLE ActivityLog (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    username  TEXT,
    action    TEXT,
    timestamp TEXT
);
";

pub const SEED: &str = r#"
INSERT INTO Users (username, password, roles, status) VALUES
    ('admin',         'admin',      '["admin"]',             'active'),
    ('manager',       'password',   '["manager"]',           'active'),
    ('supervisor',    'password',   '["supervisor"]',        'active'),
    ('hr',            'password',   '["hr"]',                'active'),
    ('maintenance',   'password',   '["maintenance"]',       'active'),
    ('viewer',        'password',   '["viewer"]',            'inactive'),
    ('hr_supervisor', 'password',   '["hr","supervisor"]',   'active'),
    ('superadmin',    'superadmin', '["super_admin"]',       'active');

INSERT INTO Buildings (id, name, location, capacity, status) VALUES
    (1, 'A-Block', 'North Wing', 150, 'active'),
    (2, 'B-Block', 'South Wing', 120, 'active');

INSERT INTO Floors (id, buildingId, floorNumber, description) VALUES
    (1, 1, 'G', 'Ground Floor'),
    (2, 1, '1', 'First Floor'),
    (3, 2, 'G', 'Ground Floor');

INSERT INTO Rooms (id, floorId, roomNumber, capacity, currentOccupancy, status) VALUES
    (1, 1, 'A-G01', 2, 1, 'occupied'),
    (2, 1, 'A-G02', 2, 0, 'available'),
    (3, 2, 'A-101', 1, 0, 'maintenance'),
    (4, 3, 'B-G01', 2, 0, 'available');

INSERT INTO Employees (fullName, nationalId, phone, department, status, contractEndDate) VALUES
    ('John Doe',    '123456789', '555-0101', 'it',           'active', '2025-12-31T00:00:00.000Z'),
    ('Jane Smith',  '987654321', '555-0102', 'hr',           'active', '2026-12-31T00:00:00.000Z'),
    ('Peter Jones', '112233445', '555-0103', 'housekeeping', 'left',   '2023-01-01T00:00:00.000Z');

INSERT INTO Assignments (employeeId, roomId, checkInDate, expectedCheckOutDate, checkOutDate) VALUES
    (1, 1, '2023-10-01T10:00:00.000Z', '2024-12-31T10:00:00.000Z', NULL);

INSERT INTO MaintenanceRequests (roomId, problemType, description, status, reportedAt) VALUES
    (3, 'Plumbing',   'Leaky faucet',              'in_progress', '2024-07-20T14:30:00.000Z'),
    (2, 'Electrical', 'Light fixture not working', 'open',        '2024-07-22T09:15:00.000Z');

INSERT INTO Reservations (roomId, guestName, checkInDate, checkOutDate, notes, guestIdCardNumber, guestPhone, guestPosition, department) VALUES
    (4, 'Guest Tester', '2024-09-01T12:00:00.000Z', '2024-09-15T12:00:00.000Z', 'VIP Guest', 'G12345', '555-GUEST', 'Consultant', 'marketing');

INSERT OR REPLACE INTO SystemVariables (key, value) VALUES
    ('default_language', 'en'),
    ('ai_suggestions',   'false');
"#;
